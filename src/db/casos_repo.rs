// src/db/casos_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::casos::{ActualizarCasoPayload, Caso},
};

#[derive(Clone)]
pub struct CasosRepository {
    pool: PgPool,
}

impl CasosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_caso(
        &self,
        cliente_id: Uuid,
        titulo: &str,
        descripcion: Option<&str>,
    ) -> Result<Caso, AppError> {
        let caso = sqlx::query_as::<_, Caso>(
            r#"
            INSERT INTO casos (cliente_id, titulo, descripcion)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(cliente_id)
        .bind(titulo)
        .bind(descripcion)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // FK rota = el cliente no existe
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ClienteNoEncontrado;
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(caso)
    }

    pub async fn get_all_casos(&self) -> Result<Vec<Caso>, AppError> {
        let casos = sqlx::query_as::<_, Caso>("SELECT * FROM casos ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(casos)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Caso>, AppError> {
        let caso = sqlx::query_as::<_, Caso>("SELECT * FROM casos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(caso)
    }

    // Actualización parcial: COALESCE mantiene el valor actual cuando el
    // campo no viene en el payload.
    pub async fn update_caso(
        &self,
        id: Uuid,
        payload: &ActualizarCasoPayload,
    ) -> Result<Option<Caso>, AppError> {
        let caso = sqlx::query_as::<_, Caso>(
            r#"
            UPDATE casos
            SET titulo      = COALESCE($2, titulo),
                descripcion = COALESCE($3, descripcion),
                estado      = COALESCE($4, estado),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.titulo.as_deref())
        .bind(payload.descripcion.as_deref())
        .bind(payload.estado)
        .fetch_optional(&self.pool)
        .await?;

        Ok(caso)
    }

    pub async fn delete_caso(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM casos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
