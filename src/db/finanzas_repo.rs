// src/db/finanzas_repo.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, fechas},
    models::pagos::ResumenPendientes,
};

// Consultas de libro mayor: reportes, trabajos por hora, gastos, servicios,
// suscripciones. Todo lo que el evaluador de aprobación necesita contar.
#[derive(Clone)]
pub struct FinanzasRepository {
    pool: PgPool,
}

impl FinanzasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Fecha del reporte más reciente del cliente. De acá se deriva el mes
    // activo (el mes calendario anterior a esta fecha).
    pub async fn fecha_ultimo_reporte<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
    ) -> Result<Option<NaiveDate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fecha = sqlx::query_scalar::<_, Option<NaiveDate>>(
            "SELECT MAX(fecha) FROM reportes WHERE cliente_id = $1",
        )
        .bind(cliente_id)
        .fetch_one(executor)
        .await?;

        Ok(fecha)
    }

    // Arma el resumen de pendientes del cliente para el mes dado ("YYYY-MM").
    //
    // Corre los cinco COUNT sobre una misma conexión/transacción para que el
    // snapshot sea consistente. `excluir_comprobante` deja afuera el
    // comprobante que está siendo revisado en este momento (sigue PENDIENTE
    // en la base hasta que la revisión se confirme).
    pub async fn contar_pendientes(
        &self,
        executor: &mut sqlx::PgConnection,
        cliente_id: Uuid,
        mes: &str,
        excluir_comprobante: Option<Uuid>,
    ) -> Result<ResumenPendientes, AppError> {
        let (inicio, fin): (NaiveDate, NaiveDate) =
            fechas::rango_fechas_mes(mes).ok_or_else(|| AppError::MesInvalido(mes.to_owned()))?;

        let mut conn = executor.acquire().await?;

        let trabajos_hora = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM trabajos_hora
            WHERE cliente_id = $1 AND fecha BETWEEN $2 AND $3 AND NOT facturado
            "#,
        )
        .bind(cliente_id)
        .bind(inicio)
        .bind(fin)
        .fetch_one(&mut *conn)
        .await?;

        let gastos = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM gastos
            WHERE cliente_id = $1 AND fecha BETWEEN $2 AND $3 AND NOT facturado
            "#,
        )
        .bind(cliente_id)
        .bind(inicio)
        .bind(fin)
        .fetch_one(&mut *conn)
        .await?;

        let servicios = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM servicios
            WHERE cliente_id = $1 AND fecha BETWEEN $2 AND $3 AND NOT facturado
            "#,
        )
        .bind(cliente_id)
        .bind(inicio)
        .bind(fin)
        .fetch_one(&mut *conn)
        .await?;

        // Las suscripciones no se recortan por fecha: una suscripción activa
        // es deuda recurrente del ciclo en curso, sea cual sea el mes.
        let suscripciones_activas = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM suscripciones WHERE cliente_id = $1 AND activa",
        )
        .bind(cliente_id)
        .fetch_one(&mut *conn)
        .await?;

        let comprobantes_pendientes = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM comprobantes
            WHERE cliente_id = $1
              AND mes = $2
              AND estado = 'PENDIENTE'
              AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(cliente_id)
        .bind(mes)
        .bind(excluir_comprobante)
        .fetch_one(&mut *conn)
        .await?;

        Ok(ResumenPendientes {
            trabajos_hora,
            gastos,
            servicios,
            suscripciones_activas,
            comprobantes_pendientes,
        })
    }
}
