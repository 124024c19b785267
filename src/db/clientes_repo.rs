// src/db/clientes_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::clientes::{Cliente, TipoCliente},
};

#[derive(Clone)]
pub struct ClientesRepository {
    pool: PgPool,
}

impl ClientesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_cliente(
        &self,
        nombre: &str,
        tipo: TipoCliente,
        modo_pago: bool,
    ) -> Result<Cliente, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (nombre, tipo, modo_pago)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(tipo)
        .bind(modo_pago)
        .fetch_one(&self.pool)
        .await?;

        Ok(cliente)
    }

    pub async fn get_all_clientes(&self) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes ORDER BY nombre ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(clientes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }

    // Enciende o apaga el modo pago de un cliente. Recibe el executor para
    // poder correr dentro de la misma transacción que la revisión del
    // comprobante.
    pub async fn set_modo_pago<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
        modo_pago: bool,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE clientes SET modo_pago = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(cliente_id)
        .bind(modo_pago)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // Reset administrativo masivo: apaga el modo pago de todos los clientes
    // que lo tengan encendido.
    pub async fn reset_modo_pago(&self) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE clientes SET modo_pago = FALSE, updated_at = NOW() WHERE modo_pago")
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
