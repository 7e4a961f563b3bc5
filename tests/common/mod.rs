#![allow(dead_code)]

use actix_web::{
    dev::{ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use soap_payment_api::config::GatewayConfig;
use soap_payment_api::models::payment::{Amount, PaymentRequest, PaymentResult, ResultCode};
use soap_payment_api::routes::{self, payment::PaymentSettings, payment::CREATE_PAYMENT_PATH};
use soap_payment_api::services::payment::interface::{PaymentError, PaymentOperations};
use soap_payment_api::services::view_service::ViewService;

pub const TEST_WS_USER: &str = "ws@Company.TestCompany";
pub const TEST_WS_PASSWORD: &str = "YourWSPassword";
pub const TEST_MERCHANT: &str = "TestMerchant";

pub enum FakeOutcome {
    Completed(PaymentResult),
    Fault,
}

/// Payment provider double that records every request it receives.
pub struct FakeProvider {
    outcome: FakeOutcome,
    pub requests: Mutex<Vec<PaymentRequest>>,
}

impl FakeProvider {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn authorised() -> Self {
        Self::new(FakeOutcome::Completed(PaymentResult {
            psp_reference: "8813760866450096".to_string(),
            result_code: ResultCode::Authorised,
            auth_code: Some("12345".to_string()),
            refusal_reason: None,
        }))
    }

    pub fn refused() -> Self {
        Self::new(FakeOutcome::Completed(PaymentResult {
            psp_reference: "8813760866450097".to_string(),
            result_code: ResultCode::Refused,
            auth_code: None,
            refusal_reason: Some("Not enough balance".to_string()),
        }))
    }

    pub fn faulting() -> Self {
        Self::new(FakeOutcome::Fault)
    }

    pub fn recorded(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PaymentOperations for FakeProvider {
    async fn authorise(&self, request: &PaymentRequest) -> Result<PaymentResult, PaymentError> {
        self.requests.lock().unwrap().push(request.clone());

        match &self.outcome {
            FakeOutcome::Completed(result) => Ok(result.clone()),
            FakeOutcome::Fault => Err(PaymentError::ServiceFault {
                code: "soap:Server".to_string(),
                message: "validation 101 Invalid card number".to_string(),
            }),
        }
    }
}

pub fn demo_amount() -> Amount {
    Amount {
        currency: "EUR".to_string(),
        value: 199,
    }
}

pub fn test_settings() -> PaymentSettings {
    PaymentSettings {
        merchant_account: TEST_MERCHANT.to_string(),
        demo_amount: demo_amount(),
    }
}

pub fn test_gateway_config(endpoint: &str) -> GatewayConfig {
    GatewayConfig {
        endpoint: Url::parse(endpoint).unwrap(),
        username: TEST_WS_USER.to_string(),
        password: TEST_WS_PASSWORD.to_string(),
        merchant_account: TEST_MERCHANT.to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

/// The application as `main` wires it, around any provider.
pub fn create_app<P: PaymentOperations + 'static>(
    provider: web::Data<P>,
    gateway: GatewayConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(provider)
        .app_data(web::Data::new(
            ViewService::new(CREATE_PAYMENT_PATH).unwrap(),
        ))
        .app_data(web::Data::new(test_settings()))
        .app_data(web::Data::new(gateway))
        .configure(routes::config::<P>)
}

pub fn create_fake_app(
    provider: web::Data<FakeProvider>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    create_app(provider, test_gateway_config("http://127.0.0.1:9/soap/Payment"))
}

#[derive(Debug, Clone)]
pub struct ReceivedCall {
    pub authorization: Option<String>,
    pub soap_action: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

struct FakeSoapState {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<ReceivedCall>>>,
}

async fn fake_soap_endpoint(
    req: HttpRequest,
    body: String,
    state: web::Data<FakeSoapState>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.received.lock().unwrap().push(ReceivedCall {
        authorization: header("authorization"),
        soap_action: header("soapaction"),
        content_type: header("content-type"),
        body,
    });

    HttpResponse::build(state.status)
        .content_type("text/xml; charset=utf-8")
        .body(state.body.clone())
}

/// Local stand-in for the payment web service answering every call alike.
pub struct FakeSoapServer {
    pub endpoint: String,
    pub received: Arc<Mutex<Vec<ReceivedCall>>>,
    handle: ServerHandle,
}

impl FakeSoapServer {
    pub fn start(status: StatusCode, body: &str) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(FakeSoapState {
            status,
            body: body.to_string(),
            received: received.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/soap/Payment", web::post().to(fake_soap_endpoint))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            endpoint: format!("http://127.0.0.1:{}/soap/Payment", port),
            received,
            handle,
        }
    }

    pub fn calls(&self) -> Vec<ReceivedCall> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub const AUTHORISED_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Body>
    <ns1:authoriseResponse xmlns:ns1="http://payment.services.adyen.com">
      <ns1:paymentResult>
        <authCode xmlns="http://payment.services.adyen.com">12345</authCode>
        <pspReference xmlns="http://payment.services.adyen.com">8813760866450096</pspReference>
        <refusalReason xmlns="http://payment.services.adyen.com" xsi:nil="true"/>
        <resultCode xmlns="http://payment.services.adyen.com">Authorised</resultCode>
      </ns1:paymentResult>
    </ns1:authoriseResponse>
  </soap:Body>
</soap:Envelope>"#;

pub const REFUSED_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Body>
    <ns1:authoriseResponse xmlns:ns1="http://payment.services.adyen.com">
      <ns1:paymentResult>
        <authCode xmlns="http://payment.services.adyen.com" xsi:nil="true"/>
        <pspReference xmlns="http://payment.services.adyen.com">8813760866450097</pspReference>
        <refusalReason xmlns="http://payment.services.adyen.com">Not enough balance</refusalReason>
        <resultCode xmlns="http://payment.services.adyen.com">Refused</resultCode>
      </ns1:paymentResult>
    </ns1:authoriseResponse>
  </soap:Body>
</soap:Envelope>"#;

pub const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>security 010 Not allowed</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;
