use serde::Deserialize;

use crate::models::payment::{PaymentResult, ResultCode};
use crate::services::payment::interface::PaymentError;

/// A decoded reply to the `authorise` action.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthoriseResponse {
    Completed(PaymentResult),
    Fault { code: String, message: String },
}

// Elements are matched by local name, so namespace prefixes do not matter.
// Anything not listed here (additionalData, dccAmount, ...) is skipped.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Body")]
    body: Body,
}

#[derive(Deserialize)]
struct Body {
    #[serde(rename = "authoriseResponse")]
    authorise_response: Option<AuthoriseResponseElement>,
    #[serde(rename = "Fault")]
    fault: Option<Fault>,
}

#[derive(Deserialize)]
struct AuthoriseResponseElement {
    #[serde(rename = "paymentResult")]
    payment_result: Option<SoapPaymentResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SoapPaymentResult {
    psp_reference: Option<String>,
    result_code: Option<String>,
    auth_code: Option<String>,
    refusal_reason: Option<String>,
}

#[derive(Deserialize)]
struct Fault {
    faultcode: Option<String>,
    faultstring: Option<String>,
}

// `xsi:nil` and empty elements both arrive as empty text
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl TryFrom<SoapPaymentResult> for PaymentResult {
    type Error = PaymentError;

    fn try_from(raw: SoapPaymentResult) -> Result<Self, Self::Error> {
        let psp_reference = non_empty(raw.psp_reference)
            .ok_or_else(|| PaymentError::Decode("paymentResult has no pspReference".to_string()))?;
        let result_code = non_empty(raw.result_code)
            .ok_or_else(|| PaymentError::Decode("paymentResult has no resultCode".to_string()))?
            .parse::<ResultCode>()
            .map_err(|e| PaymentError::Decode(e.to_string()))?;

        Ok(PaymentResult {
            psp_reference,
            result_code,
            auth_code: non_empty(raw.auth_code),
            refusal_reason: non_empty(raw.refusal_reason),
        })
    }
}

/// Decodes a SOAP response body into a payment result or a fault.
pub fn decode_authorise_response(body: &str) -> Result<AuthoriseResponse, PaymentError> {
    let envelope: Envelope =
        quick_xml::de::from_str(body).map_err(|e| PaymentError::Decode(e.to_string()))?;

    if let Some(fault) = envelope.body.fault {
        return Ok(AuthoriseResponse::Fault {
            code: non_empty(fault.faultcode).unwrap_or_default(),
            message: non_empty(fault.faultstring).unwrap_or_default(),
        });
    }

    let raw = envelope
        .body
        .authorise_response
        .and_then(|response| response.payment_result)
        .ok_or_else(|| {
            PaymentError::Decode(
                "response contains neither a paymentResult nor a Fault".to_string(),
            )
        })?;

    Ok(AuthoriseResponse::Completed(PaymentResult::try_from(raw)?))
}
