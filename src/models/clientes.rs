// src/models/clientes.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (mapeando el Postgres) ---

// Los dos tipos de cliente del estudio: persona física o empresa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_cliente", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum TipoCliente {
    Cliente, // Persona física
    Empresa, // Persona jurídica
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Estudios Pérez S.A.")]
    pub nombre: String,

    pub tipo: TipoCliente,

    // "Modo pago": el cliente está en un esquema de facturación recurrente
    // que exige revisión periódica de comprobantes. Solo lo apaga la
    // aprobación de un comprobante (vía el evaluador) o el reset masivo.
    #[schema(example = true)]
    pub modo_pago: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearClientePayload {
    #[validate(length(min = 2, message = "El nombre debe tener al menos 2 caracteres."))]
    #[schema(example = "Estudios Pérez S.A.")]
    pub nombre: String,

    pub tipo: TipoCliente,

    // Si no viene, el cliente arranca fuera de modo pago
    pub modo_pago: Option<bool>,
}

// Respuesta del reset administrativo masivo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetModoPagoResponse {
    #[schema(example = 12)]
    pub clientes_actualizados: u64,
}
