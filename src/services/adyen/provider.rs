use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::GatewayConfig;
use crate::models::payment::{PaymentRequest, PaymentResult};
use crate::services::payment::interface::{PaymentError, PaymentOperations};

use super::envelope::encode_authorise_request;
use super::response::{decode_authorise_response, AuthoriseResponse};

const SOAP_ACTION: &str = "\"authorise\"";

/// Calls the provider's Payment web service over SOAP 1.1 with basic auth.
pub struct SoapPaymentProvider {
    client: reqwest::Client,
    endpoint: Url,
    username: String,
    password: String,
}

impl SoapPaymentProvider {
    pub fn new(config: &GatewayConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PaymentOperations for SoapPaymentProvider {
    async fn authorise(&self, request: &PaymentRequest) -> Result<PaymentResult, PaymentError> {
        let envelope = encode_authorise_request(request)?;

        log::info!(
            "Submitting authorise for reference {} ({} {}) to {}",
            request.reference,
            request.amount.value,
            request.amount.currency,
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", SOAP_ACTION)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match decode_authorise_response(&body) {
            Ok(AuthoriseResponse::Fault { code, message }) => {
                log::warn!("Payment service fault ({}): {} {}", status, code, message);
                Err(PaymentError::ServiceFault { code, message })
            }
            Ok(AuthoriseResponse::Completed(result)) if status.is_success() => {
                log::info!(
                    "Authorise for reference {} returned {} (pspReference {})",
                    request.reference,
                    result.result_code,
                    result.psp_reference
                );
                Ok(result)
            }
            Ok(AuthoriseResponse::Completed(_)) => Err(PaymentError::Http {
                status: status.as_u16(),
            }),
            Err(err) if !status.is_success() => {
                log::warn!("Payment service returned {} with undecodable body: {}", status, err);
                Err(PaymentError::Http {
                    status: status.as_u16(),
                })
            }
            Err(err) => Err(err),
        }
    }
}
