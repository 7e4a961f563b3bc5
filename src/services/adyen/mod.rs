pub mod envelope;
pub mod provider;
pub mod response;
