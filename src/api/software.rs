//! Software, license and assignment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::software::{
        AsignarLicencia, CreateLicencia, CreateSoftware, LicenciaConEstado, Software,
        SoftwareLicencia, UpdateSoftware,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse};

/// List software titles
#[utoipa::path(
    get,
    path = "/software",
    tag = "software",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Software list", body = Vec<Software>)
    )
)]
pub async fn list_software(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Software>>> {
    let software = state.services.software.list().await?;
    Ok(Json(software))
}

/// Get software by ID
#[utoipa::path(
    get,
    path = "/software/{id}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "Software details", body = Software),
        (status = 404, description = "Software not found")
    )
)]
pub async fn get_software(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Software>> {
    let software = state.services.software.get_by_id(id).await?;
    Ok(Json(software))
}

/// Create a software title
#[utoipa::path(
    post,
    path = "/software",
    tag = "software",
    security(("bearer_auth" = [])),
    request_body = CreateSoftware,
    responses(
        (status = 201, description = "Software created", body = Software)
    )
)]
pub async fn create_software(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSoftware>,
) -> AppResult<(StatusCode, Json<Software>)> {
    claims.require_write()?;
    let software = state.services.software.create(data).await?;
    Ok((StatusCode::CREATED, Json(software)))
}

/// Update a software title
#[utoipa::path(
    put,
    path = "/software/{id}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Software ID")),
    request_body = UpdateSoftware,
    responses(
        (status = 200, description = "Software updated", body = Software),
        (status = 404, description = "Software not found")
    )
)]
pub async fn update_software(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSoftware>,
) -> AppResult<Json<Software>> {
    claims.require_write()?;
    let software = state.services.software.update(id, data).await?;
    Ok(Json(software))
}

/// Delete a software title and its licenses
#[utoipa::path(
    delete,
    path = "/software/{id}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 204, description = "Software deleted"),
        (status = 404, description = "Software not found")
    )
)]
pub async fn delete_software(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.software.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List licenses of a software title with derived state
#[utoipa::path(
    get,
    path = "/software/{id}/licencias",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "License list", body = Vec<LicenciaConEstado>),
        (status = 404, description = "Software not found")
    )
)]
pub async fn list_licencias(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<LicenciaConEstado>>> {
    let licencias = state.services.software.list_licencias(id).await?;
    Ok(Json(licencias))
}

/// Create a license for a software title
#[utoipa::path(
    post,
    path = "/software/{id}/licencias",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Software ID")),
    request_body = CreateLicencia,
    responses(
        (status = 201, description = "License created", body = SoftwareLicencia),
        (status = 404, description = "Software not found")
    )
)]
pub async fn create_licencia(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateLicencia>,
) -> AppResult<(StatusCode, Json<SoftwareLicencia>)> {
    claims.require_write()?;
    let licencia = state.services.software.create_licencia(id, data).await?;
    Ok((StatusCode::CREATED, Json(licencia)))
}

/// Get a license with derived state
#[utoipa::path(
    get,
    path = "/licencias/{id}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "License ID")),
    responses(
        (status = 200, description = "License details", body = LicenciaConEstado),
        (status = 404, description = "License not found")
    )
)]
pub async fn get_licencia(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LicenciaConEstado>> {
    let licencia = state.services.software.get_licencia(id).await?;
    Ok(Json(licencia))
}

/// Update a license
#[utoipa::path(
    put,
    path = "/licencias/{id}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "License ID")),
    request_body = CreateLicencia,
    responses(
        (status = 200, description = "License updated", body = SoftwareLicencia),
        (status = 404, description = "License not found")
    )
)]
pub async fn update_licencia(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateLicencia>,
) -> AppResult<Json<SoftwareLicencia>> {
    claims.require_write()?;
    let licencia = state.services.software.update_licencia(id, data).await?;
    Ok(Json(licencia))
}

/// Delete a license
#[utoipa::path(
    delete,
    path = "/licencias/{id}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "License ID")),
    responses(
        (status = 204, description = "License deleted"),
        (status = 404, description = "License not found")
    )
)]
pub async fn delete_licencia(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.software.delete_licencia(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign a license to an equipment
#[utoipa::path(
    post,
    path = "/licencias/{id}/equipos",
    tag = "software",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "License ID")),
    request_body = AsignarLicencia,
    responses(
        (status = 200, description = "License assigned", body = MessageResponse),
        (status = 404, description = "License or equipment not found"),
        (status = 409, description = "Seat limit reached or already assigned")
    )
)]
pub async fn asignar_licencia(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<AsignarLicencia>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_write()?;
    state.services.software.asignar(id, &data.id_equipos).await?;
    Ok(Json(MessageResponse {
        message: format!("Licencia {} asignada a {}", id, data.id_equipos),
    }))
}

/// Remove a license assignment
#[utoipa::path(
    delete,
    path = "/licencias/{id}/equipos/{id_equipos}",
    tag = "software",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "License ID"),
        ("id_equipos" = String, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Assignment removed", body = MessageResponse),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn desasignar_licencia(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, id_equipos)): Path<(i32, String)>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_write()?;
    state.services.software.desasignar(id, &id_equipos).await?;
    Ok(Json(MessageResponse {
        message: format!("Licencia {} desasignada de {}", id, id_equipos),
    }))
}
