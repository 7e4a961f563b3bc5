use serde::Serialize;

use crate::models::payment::{Address, Amount, Card, PaymentRequest};
use crate::services::payment::interface::PaymentError;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const PAYMENT_NS: &str = "http://payment.services.adyen.com";
pub const COMMON_NS: &str = "http://common.services.adyen.com";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
#[serde(rename = "soap:Envelope")]
struct Envelope<'a> {
    #[serde(rename = "@xmlns:soap")]
    soap_ns: &'static str,
    #[serde(rename = "@xmlns:ns1")]
    payment_ns: &'static str,
    #[serde(rename = "@xmlns:ns2")]
    common_ns: &'static str,
    #[serde(rename = "soap:Body")]
    body: Body<'a>,
}

#[derive(Serialize)]
struct Body<'a> {
    #[serde(rename = "ns1:authorise")]
    authorise: Authorise<'a>,
}

#[derive(Serialize)]
struct Authorise<'a> {
    #[serde(rename = "ns1:paymentRequest")]
    payment_request: SoapPaymentRequest<'a>,
}

// Element order follows the service's schema.
#[derive(Serialize)]
struct SoapPaymentRequest<'a> {
    #[serde(rename = "ns1:amount")]
    amount: SoapAmount<'a>,
    #[serde(rename = "ns1:card")]
    card: SoapCard<'a>,
    #[serde(rename = "ns1:fraudOffset")]
    fraud_offset: i32,
    #[serde(rename = "ns1:merchantAccount")]
    merchant_account: &'a str,
    #[serde(rename = "ns1:reference")]
    reference: &'a str,
    #[serde(rename = "ns1:shopperEmail")]
    shopper_email: &'a str,
    #[serde(rename = "ns1:shopperIP", skip_serializing_if = "Option::is_none")]
    shopper_ip: Option<&'a str>,
    #[serde(rename = "ns1:shopperReference", skip_serializing_if = "Option::is_none")]
    shopper_reference: Option<&'a str>,
}

#[derive(Serialize)]
struct SoapAmount<'a> {
    #[serde(rename = "ns2:currency")]
    currency: &'a str,
    #[serde(rename = "ns2:value")]
    value: i64,
}

#[derive(Serialize)]
struct SoapCard<'a> {
    #[serde(rename = "ns1:billingAddress", skip_serializing_if = "Option::is_none")]
    billing_address: Option<SoapAddress<'a>>,
    #[serde(rename = "ns1:cvc")]
    cvc: &'a str,
    #[serde(rename = "ns1:expiryMonth")]
    expiry_month: &'a str,
    #[serde(rename = "ns1:expiryYear")]
    expiry_year: &'a str,
    #[serde(rename = "ns1:holderName")]
    holder_name: &'a str,
    #[serde(rename = "ns1:number")]
    number: &'a str,
}

#[derive(Serialize)]
struct SoapAddress<'a> {
    #[serde(rename = "ns2:city")]
    city: &'a str,
    #[serde(rename = "ns2:country")]
    country: &'a str,
    #[serde(rename = "ns2:houseNumberOrName")]
    house_number_or_name: &'a str,
    #[serde(rename = "ns2:postalCode")]
    postal_code: &'a str,
    #[serde(rename = "ns2:stateOrProvince")]
    state_or_province: &'a str,
    #[serde(rename = "ns2:street")]
    street: &'a str,
}

impl<'a> From<&'a Amount> for SoapAmount<'a> {
    fn from(amount: &'a Amount) -> Self {
        Self {
            currency: &amount.currency,
            value: amount.value,
        }
    }
}

impl<'a> From<&'a Address> for SoapAddress<'a> {
    fn from(address: &'a Address) -> Self {
        Self {
            city: &address.city,
            country: &address.country,
            house_number_or_name: &address.house_number_or_name,
            postal_code: &address.postal_code,
            state_or_province: &address.state_or_province,
            street: &address.street,
        }
    }
}

impl<'a> From<&'a Card> for SoapCard<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            billing_address: card.billing_address.as_ref().map(SoapAddress::from),
            cvc: &card.cvc,
            expiry_month: &card.expiry_month,
            expiry_year: &card.expiry_year,
            holder_name: &card.holder_name,
            number: &card.number,
        }
    }
}

impl<'a> From<&'a PaymentRequest> for SoapPaymentRequest<'a> {
    fn from(request: &'a PaymentRequest) -> Self {
        Self {
            amount: SoapAmount::from(&request.amount),
            card: SoapCard::from(&request.card),
            fraud_offset: request.fraud_offset,
            merchant_account: &request.merchant_account,
            reference: &request.reference,
            shopper_email: &request.shopper_email,
            shopper_ip: request.shopper_ip.as_deref(),
            shopper_reference: request.shopper_reference.as_deref(),
        }
    }
}

/// Builds the SOAP 1.1 envelope for the `authorise` action.
pub fn encode_authorise_request(request: &PaymentRequest) -> Result<String, PaymentError> {
    let envelope = Envelope {
        soap_ns: SOAP_ENVELOPE_NS,
        payment_ns: PAYMENT_NS,
        common_ns: COMMON_NS,
        body: Body {
            authorise: Authorise {
                payment_request: SoapPaymentRequest::from(request),
            },
        },
    };

    let body =
        quick_xml::se::to_string(&envelope).map_err(|e| PaymentError::Encode(e.to_string()))?;
    Ok(format!("{}{}", XML_DECLARATION, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment::Amount;
    use crate::services::payment::demo::demo_payment_request;

    fn request() -> PaymentRequest {
        let amount = Amount {
            currency: "EUR".to_string(),
            value: 199,
        };
        demo_payment_request("TestMerchant", &amount, "TEST-PAYMENT-1".to_string())
    }

    #[test]
    fn test_envelope_contains_request_fields() {
        let xml = encode_authorise_request(&request()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(xml.contains("<ns2:currency>EUR</ns2:currency><ns2:value>199</ns2:value>"));
        assert!(xml.contains("<ns1:merchantAccount>TestMerchant</ns1:merchantAccount>"));
        assert!(xml.contains("<ns1:reference>TEST-PAYMENT-1</ns1:reference>"));
        assert!(xml.contains("<ns1:number>5555444433331111</ns1:number>"));
        assert!(xml.contains("<ns2:stateOrProvince"));
        assert!(xml.contains("<ns2:city>Amsterdam</ns2:city>"));
        assert!(xml.contains("<ns1:fraudOffset>0</ns1:fraudOffset>"));
        assert!(!xml.contains("shopperReference"));
        assert!(xml.ends_with("</soap:Envelope>"));
    }

    #[test]
    fn test_envelope_escapes_text() {
        let mut request = request();
        request.card.holder_name = "Smith & <Sons>".to_string();
        request.shopper_reference = Some("shopper-1".to_string());

        let xml = encode_authorise_request(&request).unwrap();
        assert!(xml.contains("<ns1:holderName>Smith &amp; &lt;Sons&gt;</ns1:holderName>"));
        assert!(xml.contains("<ns1:shopperReference>shopper-1</ns1:shopperReference>"));
    }

    #[test]
    fn test_card_without_billing_address() {
        let mut request = request();
        request.card.billing_address = None;

        let xml = encode_authorise_request(&request).unwrap();
        assert!(!xml.contains("billingAddress"));
        assert!(xml.contains("<ns1:card><ns1:cvc>737</ns1:cvc>"));
    }
}
