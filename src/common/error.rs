// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("El e-mail ya existe")]
    EmailYaExiste,

    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Usuario no encontrado")]
    UsuarioNoEncontrado,

    #[error("Acceso denegado")]
    AccesoDenegado,

    #[error("Cliente no encontrado")]
    ClienteNoEncontrado,

    #[error("Caso no encontrado")]
    CasoNoEncontrado,

    #[error("Comprobante no encontrado")]
    ComprobanteNoEncontrado,

    #[error("El comprobante ya fue revisado")]
    ComprobanteYaRevisado,

    #[error("Mes de facturación inválido: {0}")]
    MesInvalido(String),

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado.
    // `anyhow::Error` es excelente para capturar el contexto del error.
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos todos los detalles de la validación.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MesInvalido(mes) => {
                let body = Json(json!({
                    "error": format!("El mes '{mes}' no tiene el formato YYYY-MM."),
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailYaExiste => (StatusCode::CONFLICT, "Este e-mail ya está en uso."),
            AppError::CredencialesInvalidas => {
                (StatusCode::UNAUTHORIZED, "E-mail o contraseña inválidos.")
            }
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.",
            ),
            AppError::AccesoDenegado => (
                StatusCode::FORBIDDEN,
                "No tiene permisos para esta operación.",
            ),
            AppError::UsuarioNoEncontrado => (StatusCode::NOT_FOUND, "Usuario no encontrado."),
            AppError::ClienteNoEncontrado => (StatusCode::NOT_FOUND, "Cliente no encontrado."),
            AppError::CasoNoEncontrado => (StatusCode::NOT_FOUND, "Caso no encontrado."),
            AppError::ComprobanteNoEncontrado => {
                (StatusCode::NOT_FOUND, "Comprobante no encontrado.")
            }
            AppError::ComprobanteYaRevisado => (
                StatusCode::CONFLICT,
                "El comprobante ya fue aprobado o rechazado.",
            ),

            // Todos los demás (DatabaseError, InternalServerError...) son 500.
            // `tracing` deja registrado el mensaje detallado de `thiserror`.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.",
                )
            }
        };

        // Respuesta estándar para errores simples con un solo mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
