pub mod casos_repo;
pub use casos_repo::CasosRepository;
pub mod clientes_repo;
pub use clientes_repo::ClientesRepository;
pub mod comprobantes_repo;
pub use comprobantes_repo::ComprobantesRepository;
pub mod finanzas_repo;
pub use finanzas_repo::FinanzasRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
