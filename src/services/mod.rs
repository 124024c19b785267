pub mod auth;
pub mod pagos_service;
