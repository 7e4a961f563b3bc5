use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: String, // ISO-4217, e.g. EUR
    pub value: i64,       // minor units
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub house_number_or_name: String,
    pub state_or_province: String,
    pub country: String, // ISO-3166 alpha-2
}

#[derive(Clone, PartialEq, Eq)]
pub struct Card {
    pub billing_address: Option<Address>,
    pub expiry_month: String, // two digits, zero padded
    pub expiry_year: String,  // four digits
    pub holder_name: String,
    pub number: String,
    pub cvc: String,
}

impl Card {
    /// Card number with everything after the first six digits replaced by `*`.
    pub fn masked_number(&self) -> String {
        match self.number.get(..6) {
            Some(bin) if self.number.len() > 6 => {
                format!("{}{}", bin, "*".repeat(self.number.len() - 6))
            }
            _ => "*".repeat(self.number.len()),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("billing_address", &self.billing_address)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("holder_name", &self.holder_name)
            .field("number", &self.masked_number())
            .field("cvc", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub merchant_account: String,
    pub amount: Amount,
    pub reference: String,
    pub shopper_ip: Option<String>,
    pub shopper_email: String,
    pub shopper_reference: Option<String>,
    pub fraud_offset: i32, // added to the provider's fraud score
    pub card: Card,
}

/// Outcome of an authorise call. Refused is a normal outcome, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultCode {
    Authorised,
    Refused,
    Error,
}

impl ResultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCode::Authorised => "Authorised",
            ResultCode::Refused => "Refused",
            ResultCode::Error => "Error",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResultCode(pub String);

impl fmt::Display for UnknownResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown result code '{}'", self.0)
    }
}

impl std::error::Error for UnknownResultCode {}

impl FromStr for ResultCode {
    type Err = UnknownResultCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Authorised" => Ok(ResultCode::Authorised),
            "Refused" => Ok(ResultCode::Refused),
            "Error" => Ok(ResultCode::Error),
            other => Err(UnknownResultCode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentResult {
    pub psp_reference: String,
    pub result_code: ResultCode,
    pub auth_code: Option<String>,      // only when authorised
    pub refusal_reason: Option<String>, // only when refused
}
