// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CasosRepository, ClientesRepository, ComprobantesRepository, FinanzasRepository,
        UserRepository,
    },
    services::{auth::AuthService, pagos_service::PagosService},
};

// El estado compartido, accesible en toda la aplicación
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub pagos_service: PagosService,
    pub casos_repo: CasosRepository,
    pub clientes_repo: ClientesRepository,
    pub comprobantes_repo: ComprobantesRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        // Conecta a la base de datos, usando '?' para propagar errores
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida con éxito!");

        // --- Arma el grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let casos_repo = CasosRepository::new(db_pool.clone());
        let clientes_repo = ClientesRepository::new(db_pool.clone());
        let comprobantes_repo = ComprobantesRepository::new(db_pool.clone());
        let finanzas_repo = FinanzasRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let pagos_service = PagosService::new(
            comprobantes_repo.clone(),
            finanzas_repo,
            clientes_repo.clone(),
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            auth_service,
            pagos_service,
            casos_repo,
            clientes_repo,
            comprobantes_repo,
        })
    }
}
