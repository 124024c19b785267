// src/handlers/casos.rs

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
    models::casos::{ActualizarCasoPayload, Caso, CrearCasoPayload},
};

// POST /api/casos
#[utoipa::path(
    post,
    path = "/api/casos",
    tag = "Casos",
    request_body = CrearCasoPayload,
    responses(
        (status = 201, description = "Caso creado", body = Caso),
        (status = 400, description = "Datos inválidos"),
        (status = 404, description = "Cliente no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_caso(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearCasoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let caso = app_state
        .casos_repo
        .create_caso(
            payload.cliente_id,
            &payload.titulo,
            payload.descripcion.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(caso)))
}

// GET /api/casos
#[utoipa::path(
    get,
    path = "/api/casos",
    tag = "Casos",
    responses(
        (status = 200, description = "Lista de casos", body = Vec<Caso>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_casos(State(app_state): State<AppState>) -> Result<Json<Vec<Caso>>, AppError> {
    let casos = app_state.casos_repo.get_all_casos().await?;

    Ok(Json(casos))
}

// GET /api/casos/{id}
#[utoipa::path(
    get,
    path = "/api/casos/{id}",
    tag = "Casos",
    params(("id" = Uuid, Path, description = "ID del caso")),
    responses(
        (status = 200, description = "Caso encontrado", body = Caso),
        (status = 404, description = "Caso no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obtener_caso(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Caso>, AppError> {
    let caso = app_state
        .casos_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::CasoNoEncontrado)?;

    Ok(Json(caso))
}

// PUT /api/casos/{id}
#[utoipa::path(
    put,
    path = "/api/casos/{id}",
    tag = "Casos",
    params(("id" = Uuid, Path, description = "ID del caso")),
    request_body = ActualizarCasoPayload,
    responses(
        (status = 200, description = "Caso actualizado", body = Caso),
        (status = 404, description = "Caso no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn actualizar_caso(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarCasoPayload>,
) -> Result<Json<Caso>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let caso = app_state
        .casos_repo
        .update_caso(id, &payload)
        .await?
        .ok_or(AppError::CasoNoEncontrado)?;

    Ok(Json(caso))
}

// DELETE /api/casos/{id}
#[utoipa::path(
    delete,
    path = "/api/casos/{id}",
    tag = "Casos",
    params(("id" = Uuid, Path, description = "ID del caso")),
    responses(
        (status = 204, description = "Caso eliminado"),
        (status = 404, description = "Caso no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_caso(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let eliminados = app_state.casos_repo.delete_caso(id).await?;

    if eliminados == 0 {
        return Err(AppError::CasoNoEncontrado);
    }

    Ok(StatusCode::NO_CONTENT)
}
