use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::models::payment::Amount;
use crate::models::payment_input::is_currency_code;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DEFAULT_SOAP_ENDPOINT: &str = "https://pal-test.adyen.com/pal/servlet/soap/Payment";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_AMOUNT_VALUE: i64 = 199;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the payment web service.
#[derive(Clone)]
pub struct GatewayConfig {
    pub endpoint: Url,
    pub username: String,
    pub password: String,
    pub merchant_account: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &mask(&self.username))
            .field("password", &"***")
            .field("merchant_account", &self.merchant_account)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gateway: GatewayConfig,
    /// Amount submitted by the demo payment page.
    pub demo_amount: Amount,
}

/// Keeps the first and last four characters of longer values.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint_raw =
            optional("ADYEN_SOAP_ENDPOINT").unwrap_or_else(|| DEFAULT_SOAP_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|_| ConfigError::Invalid {
            name: "ADYEN_SOAP_ENDPOINT",
            value: endpoint_raw.clone(),
        })?;

        let timeout_secs: u64 = parsed("ADYEN_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "ADYEN_REQUEST_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        Ok(Self {
            endpoint,
            username: required("ADYEN_WS_USER")?,
            password: required("ADYEN_WS_PASSWORD")?,
            merchant_account: required("ADYEN_MERCHANT_ACCOUNT")?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional("HOST").unwrap_or_else(|| HOST.to_string());
        let port = parsed("PORT", PORT)?;

        let currency = optional("DEMO_AMOUNT_CURRENCY")
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
            .trim()
            .to_uppercase();
        if !is_currency_code(&currency) {
            return Err(ConfigError::Invalid {
                name: "DEMO_AMOUNT_CURRENCY",
                value: currency,
            });
        }
        let value: i64 = parsed("DEMO_AMOUNT_VALUE", DEFAULT_AMOUNT_VALUE)?;
        if value <= 0 {
            return Err(ConfigError::Invalid {
                name: "DEMO_AMOUNT_VALUE",
                value: value.to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            gateway: GatewayConfig::from_env()?,
            demo_amount: Amount { currency, value },
        })
    }
}
