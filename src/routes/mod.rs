use actix_web::web;

use crate::errors::json_error_handler;
use crate::services::payment::interface::PaymentOperations;

pub mod health;
pub mod payment;

/// Registers every route against the payment provider `P`.
///
/// The app must carry `web::Data` for `P`, `PaymentSettings`, `ViewService`
/// and `GatewayConfig`.
pub fn config<P: PaymentOperations + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::resource(payment::CREATE_PAYMENT_PATH)
                .route(web::get().to(payment::show_payment_page))
                .route(web::post().to(payment::create_payment::<P>)),
        )
        .service(
            web::scope("/api")
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route(
                    "/payments/authorise",
                    web::post().to(payment::authorise_payment::<P>),
                ),
        );
}
