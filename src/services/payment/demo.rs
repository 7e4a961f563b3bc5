use chrono::{DateTime, Local, TimeZone};

use crate::models::payment::{Address, Amount, Card, PaymentRequest};

const REFERENCE_PREFIX: &str = "TEST-PAYMENT-";

/// Merchant reference derived from the wall clock at second granularity.
///
/// Two payments created within the same second share a reference.
pub fn payment_reference<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}", REFERENCE_PREFIX, now.format("%Y-%m-%d-%H:%M:%S"))
}

pub fn current_payment_reference() -> String {
    payment_reference(&Local::now())
}

fn demo_card() -> Card {
    Card {
        billing_address: Some(Address {
            street: "Simon Carmiggeltstraat".to_string(),
            postal_code: "1011 DJ".to_string(),
            city: "Amsterdam".to_string(),
            house_number_or_name: "6-50".to_string(),
            state_or_province: "".to_string(),
            country: "NL".to_string(),
        }),
        expiry_month: "06".to_string(),
        expiry_year: "2016".to_string(),
        holder_name: "John Doe".to_string(),
        number: "5555444433331111".to_string(),
        cvc: "737".to_string(),
    }
}

/// The fixed card payment submitted by the demo page.
pub fn demo_payment_request(
    merchant_account: &str,
    amount: &Amount,
    reference: String,
) -> PaymentRequest {
    PaymentRequest {
        merchant_account: merchant_account.to_string(),
        amount: amount.clone(),
        reference,
        shopper_ip: Some("1.1.1.1".to_string()),
        shopper_email: "test@example.com".to_string(),
        shopper_reference: None,
        fraud_offset: 0,
        card: demo_card(),
    }
}
