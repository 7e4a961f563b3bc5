use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use soap_payment_api::config::AppConfig;
use soap_payment_api::routes::{self, payment::PaymentSettings};
use soap_payment_api::services::adyen::provider::SoapPaymentProvider;
use soap_payment_api::services::view_service::ViewService;

fn startup_error(message: String) -> std::io::Error {
    log::error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env()
        .map_err(|e| startup_error(format!("Invalid configuration: {}", e)))?;
    log::info!("Loaded gateway configuration: {:?}", config.gateway);

    let provider = web::Data::new(
        SoapPaymentProvider::new(&config.gateway)
            .map_err(|e| startup_error(format!("Failed to create SOAP client: {}", e)))?,
    );
    let view = web::Data::new(
        ViewService::new(routes::payment::CREATE_PAYMENT_PATH)
            .map_err(|e| startup_error(format!("Failed to load templates: {}", e)))?,
    );
    let settings = web::Data::new(PaymentSettings {
        merchant_account: config.gateway.merchant_account.clone(),
        demo_amount: config.demo_amount.clone(),
    });
    let gateway = web::Data::new(config.gateway.clone());

    log::info!(
        "Starting HTTP server on {}:{} (payment service {})",
        config.host,
        config.port,
        provider.endpoint()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(provider.clone())
            .app_data(view.clone())
            .app_data(settings.clone())
            .app_data(gateway.clone())
            .configure(routes::config::<SoapPaymentProvider>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
