use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use std::net::{IpAddr, SocketAddr};

use crate::errors::ApiError;
use crate::models::payment::{Amount, PaymentResult};
use crate::models::payment_input::PaymentInput;
use crate::services::payment::demo::{current_payment_reference, demo_payment_request};
use crate::services::payment::interface::PaymentOperations;
use crate::services::view_service::ViewService;

pub const CREATE_PAYMENT_PATH: &str = "/2.API/Soap/CreatePaymentAPI";

/// Merchant settings shared by the payment handlers.
#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub merchant_account: String,
    pub demo_amount: Amount,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn render_page(
    view: &ViewService,
    result: Option<&PaymentResult>,
) -> Result<HttpResponse, ApiError> {
    let body = view.render_create_payment(result).map_err(|e| {
        log::error!("Failed to render payment page: {}", e);
        ApiError::from(e)
    })?;
    Ok(html(body))
}

fn client_ip(req: &HttpRequest) -> Option<String> {
    let info = req.connection_info();
    let addr = info.realip_remote_addr()?;

    addr.parse::<SocketAddr>()
        .map(|socket| socket.ip())
        .or_else(|_| addr.parse::<IpAddr>())
        .ok()
        .map(|ip| ip.to_string())
}

// GET: page with the submit form only
pub async fn show_payment_page(view: web::Data<ViewService>) -> Result<HttpResponse, ApiError> {
    render_page(&view, None)
}

// POST: submit the demo payment, the request body is not read
pub async fn create_payment<P: PaymentOperations + 'static>(
    provider: web::Data<P>,
    settings: web::Data<PaymentSettings>,
    view: web::Data<ViewService>,
) -> Result<HttpResponse, ApiError> {
    let request = demo_payment_request(
        &settings.merchant_account,
        &settings.demo_amount,
        current_payment_reference(),
    );

    let result = provider.authorise(&request).await.map_err(|e| {
        log::error!("Authorise failed for reference {}: {}", request.reference, e);
        ApiError::from(e)
    })?;

    render_page(&view, Some(&result))
}

pub async fn authorise_payment<P: PaymentOperations + 'static>(
    req: HttpRequest,
    provider: web::Data<P>,
    settings: web::Data<PaymentSettings>,
    input: web::Json<PaymentInput>,
) -> Result<HttpResponse, ApiError> {
    let client_ip = client_ip(&req);
    let request = input.into_inner().into_payment_request(
        &settings.merchant_account,
        current_payment_reference(),
        client_ip.as_deref(),
    )?;

    let result = provider.authorise(&request).await.map_err(|e| {
        log::error!("Authorise failed for reference {}: {}", request.reference, e);
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(result))
}
