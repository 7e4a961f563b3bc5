use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::config::{mask, GatewayConfig};
use crate::services::view_service::ViewService;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    gateway: web::Data<GatewayConfig>,
    view: web::Data<ViewService>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    health
        .services
        .insert("payment_gateway".to_string(), check_payment_gateway(&gateway));

    let templates_result = check_templates(&view);
    health
        .services
        .insert("templates".to_string(), templates_result.clone());

    if templates_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

// Credentials are validated at startup, the payment service itself is not called
fn check_payment_gateway(gateway: &GatewayConfig) -> ServiceStatus {
    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "SOAP endpoint {}, web service user {}, merchant account {}, timeout {}s",
            gateway.endpoint.host_str().unwrap_or("unknown"),
            mask(&gateway.username),
            gateway.merchant_account,
            gateway.request_timeout.as_secs()
        )),
    }
}

fn check_templates(view: &ViewService) -> ServiceStatus {
    match view.render_create_payment(None) {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(e) => {
            log::error!("Template health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to render page: {}", e)),
            }
        }
    }
}
