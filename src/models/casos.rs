// src/models/casos.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_caso", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum EstadoCaso {
    Abierto,
    Cerrado,
    Archivado,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Caso {
    pub id: Uuid,

    pub cliente_id: Uuid,

    #[schema(example = "Sucesión García")]
    pub titulo: String,

    pub descripcion: Option<String>,

    pub estado: EstadoCaso,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearCasoPayload {
    pub cliente_id: Uuid,

    #[validate(length(min = 3, message = "El título debe tener al menos 3 caracteres."))]
    #[schema(example = "Sucesión García")]
    pub titulo: String,

    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarCasoPayload {
    #[validate(length(min = 3, message = "El título debe tener al menos 3 caracteres."))]
    pub titulo: Option<String>,

    pub descripcion: Option<String>,

    pub estado: Option<EstadoCaso>,
}
