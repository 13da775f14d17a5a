//! Peripheral endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        auxiliar::{Auxiliar, AuxiliarQuery, CreateAuxiliar, ReasignarAuxiliar, UpdateAuxiliar},
        historial::AuxiliarHistorial,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List peripherals
#[utoipa::path(
    get,
    path = "/auxiliares",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(AuxiliarQuery),
    responses(
        (status = 200, description = "Peripheral list", body = Vec<Auxiliar>)
    )
)]
pub async fn list_auxiliares(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AuxiliarQuery>,
) -> AppResult<Json<Vec<Auxiliar>>> {
    let auxiliares = state.services.auxiliares.list(&query).await?;
    Ok(Json(auxiliares))
}

/// Get peripheral by ID
#[utoipa::path(
    get,
    path = "/auxiliares/{id_auxiliar}",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(("id_auxiliar" = i32, Path, description = "Peripheral ID")),
    responses(
        (status = 200, description = "Peripheral details", body = Auxiliar),
        (status = 404, description = "Peripheral not found")
    )
)]
pub async fn get_auxiliar(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Auxiliar>> {
    let auxiliar = state.services.auxiliares.get_by_id(id).await?;
    Ok(Json(auxiliar))
}

/// Create a standalone peripheral, assigned to an active equipment or spare
#[utoipa::path(
    post,
    path = "/auxiliares",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    request_body = CreateAuxiliar,
    responses(
        (status = 201, description = "Peripheral created", body = Auxiliar),
        (status = 400, description = "Missing name or serial, or inactive equipment"),
        (status = 404, description = "Referenced equipment not found")
    )
)]
pub async fn create_auxiliar(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateAuxiliar>,
) -> AppResult<(StatusCode, Json<Auxiliar>)> {
    claims.require_write()?;
    let auxiliar = state.services.auxiliares.create(data).await?;
    Ok((StatusCode::CREATED, Json(auxiliar)))
}

/// Update a peripheral (snapshots the current row first)
#[utoipa::path(
    put,
    path = "/auxiliares/{id_auxiliar}",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(("id_auxiliar" = i32, Path, description = "Peripheral ID")),
    request_body = UpdateAuxiliar,
    responses(
        (status = 200, description = "Peripheral updated", body = Auxiliar),
        (status = 404, description = "Peripheral not found")
    )
)]
pub async fn update_auxiliar(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuxiliar>,
) -> AppResult<Json<Auxiliar>> {
    claims.require_write()?;
    let auxiliar = state.services.auxiliares.update(id, data).await?;
    Ok(Json(auxiliar))
}

/// Soft-delete a peripheral (`estadoActivo = 0`)
#[utoipa::path(
    delete,
    path = "/auxiliares/{id_auxiliar}",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(("id_auxiliar" = i32, Path, description = "Peripheral ID")),
    responses(
        (status = 200, description = "Peripheral deactivated", body = Auxiliar),
        (status = 404, description = "Peripheral not found")
    )
)]
pub async fn delete_auxiliar(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Auxiliar>> {
    claims.require_write()?;
    let auxiliar = state.services.auxiliares.soft_delete(id).await?;
    Ok(Json(auxiliar))
}

/// Restore a soft-deleted peripheral. Refused when its last-known equipment
/// is no longer active.
#[utoipa::path(
    post,
    path = "/auxiliares/{id_auxiliar}/restore",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(("id_auxiliar" = i32, Path, description = "Peripheral ID")),
    responses(
        (status = 200, description = "Peripheral restored", body = Auxiliar),
        (status = 400, description = "Last-known equipment is no longer active"),
        (status = 404, description = "Peripheral not found")
    )
)]
pub async fn restore_auxiliar(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Auxiliar>> {
    claims.require_write()?;
    let auxiliar = state.services.auxiliares.restore(id).await?;
    Ok(Json(auxiliar))
}

/// Reassign a peripheral to another equipment, or unassign it
#[utoipa::path(
    put,
    path = "/auxiliares/{id_auxiliar}/reasignar",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(("id_auxiliar" = i32, Path, description = "Peripheral ID")),
    request_body = ReasignarAuxiliar,
    responses(
        (status = 200, description = "Peripheral reassigned", body = Auxiliar),
        (status = 400, description = "Target equipment is not active"),
        (status = 404, description = "Peripheral or equipment not found")
    )
)]
pub async fn reasignar_auxiliar(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<ReasignarAuxiliar>,
) -> AppResult<Json<Auxiliar>> {
    claims.require_write()?;
    let auxiliar = state.services.auxiliares.reasignar(id, data).await?;
    Ok(Json(auxiliar))
}

/// Peripheral history, most recent operation first
#[utoipa::path(
    get,
    path = "/auxiliares/{id_auxiliar}/historial",
    tag = "auxiliares",
    security(("bearer_auth" = [])),
    params(("id_auxiliar" = i32, Path, description = "Peripheral ID")),
    responses(
        (status = 200, description = "History rows, possibly empty", body = Vec<AuxiliarHistorial>)
    )
)]
pub async fn get_historial(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AuxiliarHistorial>>> {
    let historial = state.services.auxiliares.historial(id).await?;
    Ok(Json(historial))
}
