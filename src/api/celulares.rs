//! Mobile phone endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::celular::{Celular, CreateCelular, UpdateCelular},
    AppState,
};

use super::AuthenticatedUser;

/// List phones
#[utoipa::path(
    get,
    path = "/celulares",
    tag = "celulares",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Phone list", body = Vec<Celular>)
    )
)]
pub async fn list_celulares(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Celular>>> {
    let celulares = state.services.celulares.list().await?;
    Ok(Json(celulares))
}

/// Get phone by ID
#[utoipa::path(
    get,
    path = "/celulares/{id}",
    tag = "celulares",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Phone ID")),
    responses(
        (status = 200, description = "Phone details", body = Celular),
        (status = 404, description = "Phone not found")
    )
)]
pub async fn get_celular(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Celular>> {
    let celular = state.services.celulares.get_by_id(id).await?;
    Ok(Json(celular))
}

/// Register a phone. The IMEI must be 15 digits and unique.
#[utoipa::path(
    post,
    path = "/celulares",
    tag = "celulares",
    security(("bearer_auth" = [])),
    request_body = CreateCelular,
    responses(
        (status = 201, description = "Phone created", body = Celular),
        (status = 400, description = "Invalid IMEI"),
        (status = 409, description = "IMEI already registered")
    )
)]
pub async fn create_celular(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateCelular>,
) -> AppResult<(StatusCode, Json<Celular>)> {
    claims.require_write()?;
    let celular = state.services.celulares.create(data).await?;
    Ok((StatusCode::CREATED, Json(celular)))
}

/// Update a phone
#[utoipa::path(
    put,
    path = "/celulares/{id}",
    tag = "celulares",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Phone ID")),
    request_body = UpdateCelular,
    responses(
        (status = 200, description = "Phone updated", body = Celular),
        (status = 404, description = "Phone not found")
    )
)]
pub async fn update_celular(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCelular>,
) -> AppResult<Json<Celular>> {
    claims.require_write()?;
    let celular = state.services.celulares.update(id, data).await?;
    Ok(Json(celular))
}

/// Delete a phone
#[utoipa::path(
    delete,
    path = "/celulares/{id}",
    tag = "celulares",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Phone ID")),
    responses(
        (status = 204, description = "Phone deleted"),
        (status = 404, description = "Phone not found")
    )
)]
pub async fn delete_celular(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.celulares.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
