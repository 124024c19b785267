// src/models/pagos.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (mapeando el Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_comprobante", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum EstadoComprobante {
    Pendiente,
    Aprobado,
    Rechazado,
}

// --- Structs ---

// Un comprobante de pago subido por un cliente para un mes de facturación.
// El archivo en sí vive en el storage externo; acá solo los metadatos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comprobante {
    pub id: Uuid,

    pub cliente_id: Uuid,

    // Mes de facturación que cubre el comprobante, formato "YYYY-MM"
    #[schema(example = "2026-01")]
    pub mes: String,

    #[schema(example = "1500.50")]
    pub monto_declarado: Decimal,

    pub estado: EstadoComprobante,

    pub nota_revision: Option<String>,

    pub subido_en: DateTime<Utc>,
    pub revisado_en: Option<DateTime<Utc>>,
}

// Conteo de registros financieros pendientes de un cliente en el mes activo.
// El evaluador de aprobación decide con esto si apagar el modo pago.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumenPendientes {
    pub trabajos_hora: i64,
    pub gastos: i64,
    pub servicios: i64,
    pub suscripciones_activas: i64,
    pub comprobantes_pendientes: i64,
}

impl ResumenPendientes {
    // Hay datos pendientes si CUALQUIERA de los cinco conteos es distinto de cero
    pub fn tiene_datos(&self) -> bool {
        self.trabajos_hora > 0
            || self.gastos > 0
            || self.servicios > 0
            || self.suscripciones_activas > 0
            || self.comprobantes_pendientes > 0
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearComprobantePayload {
    pub cliente_id: Uuid,

    #[schema(example = "2026-01")]
    pub mes: String,

    #[schema(example = "1500.50")]
    pub monto_declarado: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevisarComprobantePayload {
    #[validate(length(max = 500, message = "La nota no puede superar los 500 caracteres."))]
    pub nota: Option<String>,
}

// --- Respuestas ---

// Resultado de aprobar o rechazar un comprobante
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevisionComprobante {
    pub comprobante: Comprobante,

    // Mes activo del cliente al momento de la revisión ("YYYY-MM"), si lo hay
    #[schema(example = "2026-01")]
    pub mes_activo: Option<String>,

    // El comprobante cubría un mes anterior al mes activo
    pub es_mes_anterior: bool,

    // La aprobación apagó el modo pago del cliente
    pub modo_pago_desactivado: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangoMes {
    #[schema(value_type = String, format = Date, example = "2026-01-01")]
    pub inicio: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-01-31")]
    pub fin: NaiveDate,
}

// Estado de deuda de un cliente en su mes activo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendientesCliente {
    #[schema(example = "2026-01")]
    pub mes_activo: Option<String>,

    pub rango: Option<RangoMes>,

    pub pendientes: ResumenPendientes,

    pub tiene_datos: bool,
}
