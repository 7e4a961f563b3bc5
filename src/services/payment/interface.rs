use thiserror::Error;

use crate::models::payment::{PaymentRequest, PaymentResult};

#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider answered with a SOAP fault.
    #[error("service fault {code}: {message}")]
    ServiceFault { code: String, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} from payment service")]
    Http { status: u16 },
    #[error("could not decode payment service response: {0}")]
    Decode(String),
    #[error("could not encode payment request: {0}")]
    Encode(String),
}

pub trait PaymentOperations {
    /// Submits the request to the provider's authorise action.
    ///
    /// A refused payment is an `Ok` result carrying `ResultCode::Refused`.
    async fn authorise(&self, request: &PaymentRequest) -> Result<PaymentResult, PaymentError>;
}
