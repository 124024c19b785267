// src/db/comprobantes_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::pagos::{Comprobante, EstadoComprobante},
};

#[derive(Clone)]
pub struct ComprobantesRepository {
    pool: PgPool,
}

impl ComprobantesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Registra los metadatos de un comprobante recién subido (el archivo
    // queda en el storage externo). Nace en estado PENDIENTE.
    pub async fn create_comprobante(
        &self,
        cliente_id: Uuid,
        mes: &str,
        monto_declarado: Decimal,
    ) -> Result<Comprobante, AppError> {
        let comprobante = sqlx::query_as::<_, Comprobante>(
            r#"
            INSERT INTO comprobantes (cliente_id, mes, monto_declarado)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(cliente_id)
        .bind(mes)
        .bind(monto_declarado)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ClienteNoEncontrado;
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(comprobante)
    }

    pub async fn get_all_comprobantes(
        &self,
        estado: Option<EstadoComprobante>,
    ) -> Result<Vec<Comprobante>, AppError> {
        let comprobantes = match estado {
            Some(estado) => {
                sqlx::query_as::<_, Comprobante>(
                    "SELECT * FROM comprobantes WHERE estado = $1 ORDER BY subido_en DESC",
                )
                .bind(estado)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Comprobante>(
                    "SELECT * FROM comprobantes ORDER BY subido_en DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(comprobantes)
    }

    // Busca un comprobante dentro de la transacción de revisión, con lock de
    // fila para que dos revisores no lo aprueben a la vez.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Comprobante>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comprobante =
            sqlx::query_as::<_, Comprobante>("SELECT * FROM comprobantes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(comprobante)
    }

    // Marca el comprobante como aprobado o rechazado, con la nota del revisor.
    pub async fn marcar_revisado<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        estado: EstadoComprobante,
        nota: Option<&str>,
    ) -> Result<Comprobante, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comprobante = sqlx::query_as::<_, Comprobante>(
            r#"
            UPDATE comprobantes
            SET estado        = $2,
                nota_revision = $3,
                revisado_en   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(estado)
        .bind(nota)
        .fetch_one(executor)
        .await?;

        Ok(comprobante)
    }
}
