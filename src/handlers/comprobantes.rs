// src/handlers/comprobantes.rs

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, fechas::MesFacturacion},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::pagos::{
        Comprobante, CrearComprobantePayload, EstadoComprobante, RevisarComprobantePayload,
        RevisionComprobante,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListarComprobantesQuery {
    // Filtra por estado: pendiente | aprobado | rechazado
    pub estado: Option<EstadoComprobante>,
}

// POST /api/comprobantes
#[utoipa::path(
    post,
    path = "/api/comprobantes",
    tag = "Comprobantes",
    request_body = CrearComprobantePayload,
    responses(
        (status = 201, description = "Comprobante registrado", body = Comprobante),
        (status = 400, description = "Datos inválidos"),
        (status = 404, description = "Cliente no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_comprobante(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearComprobantePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // El mes se valida acá, en el borde: adentro el evaluador lo asume bien formado
    if MesFacturacion::from_str(&payload.mes).is_err() {
        return Err(AppError::MesInvalido(payload.mes.clone()));
    }

    let comprobante = app_state
        .comprobantes_repo
        .create_comprobante(payload.cliente_id, &payload.mes, payload.monto_declarado)
        .await?;

    Ok((StatusCode::CREATED, Json(comprobante)))
}

// GET /api/comprobantes
#[utoipa::path(
    get,
    path = "/api/comprobantes",
    tag = "Comprobantes",
    params(ListarComprobantesQuery),
    responses(
        (status = 200, description = "Lista de comprobantes", body = Vec<Comprobante>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_comprobantes(
    State(app_state): State<AppState>,
    Query(query): Query<ListarComprobantesQuery>,
) -> Result<Json<Vec<Comprobante>>, AppError> {
    let comprobantes = app_state
        .comprobantes_repo
        .get_all_comprobantes(query.estado)
        .await?;

    Ok(Json(comprobantes))
}

// POST /api/comprobantes/{id}/aprobar (solo admins)
#[utoipa::path(
    post,
    path = "/api/comprobantes/{id}/aprobar",
    tag = "Comprobantes",
    params(("id" = Uuid, Path, description = "ID del comprobante")),
    request_body = RevisarComprobantePayload,
    responses(
        (status = 200, description = "Comprobante aprobado", body = RevisionComprobante),
        (status = 403, description = "Solo admins"),
        (status = 404, description = "Comprobante no encontrado"),
        (status = 409, description = "Ya fue revisado")
    ),
    security(("api_jwt" = []))
)]
pub async fn aprobar_comprobante(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RevisarComprobantePayload>,
) -> Result<Json<RevisionComprobante>, AppError> {
    user.exigir_admin()?;
    payload.validate().map_err(AppError::ValidationError)?;

    let revision = app_state
        .pagos_service
        .aprobar_comprobante(id, payload.nota.as_deref())
        .await?;

    Ok(Json(revision))
}

// POST /api/comprobantes/{id}/rechazar (solo admins)
#[utoipa::path(
    post,
    path = "/api/comprobantes/{id}/rechazar",
    tag = "Comprobantes",
    params(("id" = Uuid, Path, description = "ID del comprobante")),
    request_body = RevisarComprobantePayload,
    responses(
        (status = 200, description = "Comprobante rechazado", body = Comprobante),
        (status = 403, description = "Solo admins"),
        (status = 404, description = "Comprobante no encontrado"),
        (status = 409, description = "Ya fue revisado")
    ),
    security(("api_jwt" = []))
)]
pub async fn rechazar_comprobante(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RevisarComprobantePayload>,
) -> Result<Json<Comprobante>, AppError> {
    user.exigir_admin()?;
    payload.validate().map_err(AppError::ValidationError)?;

    let comprobante = app_state
        .pagos_service
        .rechazar_comprobante(id, payload.nota.as_deref())
        .await?;

    Ok(Json(comprobante))
}
