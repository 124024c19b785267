// src/handlers/clientes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        clientes::{Cliente, CrearClientePayload, ResetModoPagoResponse},
        pagos::PendientesCliente,
    },
};

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CrearClientePayload,
    responses(
        (status = 201, description = "Cliente creado", body = Cliente),
        (status = 400, description = "Datos inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente = app_state
        .clientes_repo
        .create_cliente(
            &payload.nombre,
            payload.tipo,
            payload.modo_pago.unwrap_or(false),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_clientes(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Cliente>>, AppError> {
    let clientes = app_state.clientes_repo.get_all_clientes().await?;

    Ok(Json(clientes))
}

// GET /api/clientes/{id}/pendientes
#[utoipa::path(
    get,
    path = "/api/clientes/{id}/pendientes",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID del cliente")),
    responses(
        (status = 200, description = "Pendientes del mes activo", body = PendientesCliente),
        (status = 404, description = "Cliente no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn pendientes_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PendientesCliente>, AppError> {
    let pendientes = app_state.pagos_service.resumen_pendientes(id).await?;

    Ok(Json(pendientes))
}

// POST /api/clientes/modo-pago/reset (solo admins)
#[utoipa::path(
    post,
    path = "/api/clientes/modo-pago/reset",
    tag = "Clientes",
    responses(
        (status = 200, description = "Reset masivo ejecutado", body = ResetModoPagoResponse),
        (status = 403, description = "Solo admins")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset_modo_pago(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ResetModoPagoResponse>, AppError> {
    user.exigir_admin()?;

    let clientes_actualizados = app_state.pagos_service.reset_modo_pago().await?;

    Ok(Json(ResetModoPagoResponse {
        clientes_actualizados,
    }))
}
