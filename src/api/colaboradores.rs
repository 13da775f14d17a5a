//! Collaborator endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::colaborador::{Colaborador, CreateColaborador, UpdateColaborador},
    AppState,
};

use super::AuthenticatedUser;

/// List collaborators
#[utoipa::path(
    get,
    path = "/colaboradores",
    tag = "colaboradores",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Collaborator list", body = Vec<Colaborador>)
    )
)]
pub async fn list_colaboradores(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Colaborador>>> {
    let colaboradores = state.services.colaboradores.list().await?;
    Ok(Json(colaboradores))
}

/// Get collaborator by ID
#[utoipa::path(
    get,
    path = "/colaboradores/{id}",
    tag = "colaboradores",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Collaborator ID")),
    responses(
        (status = 200, description = "Collaborator details", body = Colaborador),
        (status = 404, description = "Collaborator not found")
    )
)]
pub async fn get_colaborador(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Colaborador>> {
    let colaborador = state.services.colaboradores.get_by_id(id).await?;
    Ok(Json(colaborador))
}

/// Create a collaborator
#[utoipa::path(
    post,
    path = "/colaboradores",
    tag = "colaboradores",
    security(("bearer_auth" = [])),
    request_body = CreateColaborador,
    responses(
        (status = 201, description = "Collaborator created", body = Colaborador),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_colaborador(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateColaborador>,
) -> AppResult<(StatusCode, Json<Colaborador>)> {
    claims.require_write()?;
    let colaborador = state.services.colaboradores.create(data).await?;
    Ok((StatusCode::CREATED, Json(colaborador)))
}

/// Update a collaborator
#[utoipa::path(
    put,
    path = "/colaboradores/{id}",
    tag = "colaboradores",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Collaborator ID")),
    request_body = UpdateColaborador,
    responses(
        (status = 200, description = "Collaborator updated", body = Colaborador),
        (status = 404, description = "Collaborator not found")
    )
)]
pub async fn update_colaborador(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateColaborador>,
) -> AppResult<Json<Colaborador>> {
    claims.require_write()?;
    let colaborador = state.services.colaboradores.update(id, data).await?;
    Ok(Json(colaborador))
}

/// Delete a collaborator
#[utoipa::path(
    delete,
    path = "/colaboradores/{id}",
    tag = "colaboradores",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Collaborator ID")),
    responses(
        (status = 204, description = "Collaborator deleted"),
        (status = 404, description = "Collaborator not found")
    )
)]
pub async fn delete_colaborador(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.colaboradores.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
