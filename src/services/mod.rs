pub mod adyen;
pub mod payment;
pub mod view_service;
