pub mod error;
pub mod fechas;
