use regex::Regex;
use serde::Deserialize;
use std::net::IpAddr;
use std::sync::OnceLock;
use thiserror::Error;

use super::payment::{Address, Amount, Card, PaymentRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("currency must be a three letter ISO-4217 code")]
    InvalidCurrency,
    #[error("shopper email is not a valid address")]
    InvalidEmail,
    #[error("shopper IP is not a valid address")]
    InvalidShopperIp,
    #[error("reference must not be empty")]
    EmptyReference,
    #[error("not a valid card number")]
    InvalidCardNumber,
    #[error("invalid card expiration month")]
    InvalidExpiryMonth,
    #[error("invalid card expiration year")]
    InvalidExpiryYear,
    #[error("invalid card security code")]
    InvalidCvc,
    #[error("card holder name must not be empty")]
    EmptyHolderName,
    #[error("country must be a two letter ISO-3166 code")]
    InvalidCountry,
}

/// Payment fields supplied by the caller of the JSON authorise endpoint.
#[derive(Deserialize)]
pub struct PaymentInput {
    pub amount: Amount,
    pub reference: Option<String>,
    pub shopper_email: String,
    pub shopper_reference: Option<String>,
    pub shopper_ip: Option<String>,
    pub fraud_offset: Option<i32>,
    pub card: CardInput,
}

#[derive(Deserialize)]
pub struct CardInput {
    pub number: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvc: String,
    pub holder_name: String,
    pub billing_address: Option<Address>,
}

fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency regex"))
}

/// Three upper-case letters, as ISO-4217 codes are written.
pub fn is_currency_code(code: &str) -> bool {
    currency_pattern().is_match(code)
}

fn country_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{2}$").expect("valid country regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
    })
}

fn cvc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{3,4}$").expect("valid cvc regex"))
}

/// Strips whitespace and checks length and the Luhn checksum.
pub fn normalize_card_number(number: &str) -> Result<String, ValidationError> {
    let digits: String = number.split_whitespace().collect();

    if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCardNumber);
    }
    if !luhn::valid(&digits) {
        return Err(ValidationError::InvalidCardNumber);
    }

    Ok(digits)
}

impl CardInput {
    fn validate(self) -> Result<Card, ValidationError> {
        let number = normalize_card_number(&self.number)?;

        if !(1..=12).contains(&self.expiry_month) {
            return Err(ValidationError::InvalidExpiryMonth);
        }
        if !(1000..=9999).contains(&self.expiry_year) {
            return Err(ValidationError::InvalidExpiryYear);
        }
        if !cvc_pattern().is_match(&self.cvc) {
            return Err(ValidationError::InvalidCvc);
        }

        let holder_name = self.holder_name.trim().to_string();
        if holder_name.is_empty() {
            return Err(ValidationError::EmptyHolderName);
        }

        if let Some(address) = &self.billing_address {
            if !country_pattern().is_match(&address.country) {
                return Err(ValidationError::InvalidCountry);
            }
        }

        Ok(Card {
            billing_address: self.billing_address,
            expiry_month: format!("{:02}", self.expiry_month),
            expiry_year: self.expiry_year.to_string(),
            holder_name,
            number,
            cvc: self.cvc,
        })
    }
}

impl PaymentInput {
    /// Validates every field and builds the request sent to the provider.
    ///
    /// `default_reference` and `client_ip` are used when the caller left
    /// `reference` or `shopper_ip` out. Without either IP the request is
    /// sent without one.
    pub fn into_payment_request(
        self,
        merchant_account: &str,
        default_reference: String,
        client_ip: Option<&str>,
    ) -> Result<PaymentRequest, ValidationError> {
        if self.amount.value <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if !is_currency_code(&self.amount.currency) {
            return Err(ValidationError::InvalidCurrency);
        }
        if !email_pattern().is_match(&self.shopper_email) {
            return Err(ValidationError::InvalidEmail);
        }

        let shopper_ip = match self.shopper_ip {
            Some(ip) => Some(
                ip.parse::<IpAddr>()
                    .map_err(|_| ValidationError::InvalidShopperIp)?
                    .to_string(),
            ),
            None => client_ip.map(str::to_string),
        };

        let reference = match self.reference {
            Some(reference) if reference.trim().is_empty() => {
                return Err(ValidationError::EmptyReference)
            }
            Some(reference) => reference,
            None => default_reference,
        };

        Ok(PaymentRequest {
            merchant_account: merchant_account.to_string(),
            amount: self.amount,
            reference,
            shopper_ip,
            shopper_email: self.shopper_email,
            shopper_reference: self.shopper_reference,
            fraud_offset: self.fraud_offset.unwrap_or(0),
            card: self.card.validate()?,
        })
    }
}
