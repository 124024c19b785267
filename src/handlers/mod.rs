pub mod auth;
pub mod casos;
pub mod clientes;
pub mod comprobantes;
