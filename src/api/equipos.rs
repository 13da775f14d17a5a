//! Equipment endpoints.
//!
//! Create and update accept either a JSON body or a multipart form (the
//! frontend sends multipart when it attaches an image). Multipart text
//! fields are collected into a JSON object before deserializing, so both
//! paths share the same payload types.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipo::{CreateEquipo, Equipo, EquipoQuery, UpdateEquipo},
        historial::EquipoHistorial,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse};

/// One uploaded image file from a multipart request
pub struct ImagenSubida {
    pub filename: String,
    pub bytes: Bytes,
}

/// Equipment payload extractor: JSON body, or multipart form-data with text
/// fields plus an optional `imagen` file part.
pub struct EquipoPayload<T> {
    pub data: T,
    pub imagen: Option<ImagenSubida>,
}

#[async_trait]
impl<T> FromRequest<AppState> for EquipoPayload<T>
where
    T: serde::de::DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;

            let mut fields = serde_json::Map::new();
            let mut imagen = None;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {}", e)))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };

                if name == "imagen" && field.file_name().is_some() {
                    let filename = field
                        .file_name()
                        .unwrap_or("imagen.bin")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read image upload: {}", e))
                    })?;
                    imagen = Some(ImagenSubida { filename, bytes });
                } else {
                    let text = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read field {}: {}", name, e))
                    })?;
                    fields.insert(name, serde_json::Value::String(text));
                }
            }

            let data = serde_json::from_value(serde_json::Value::Object(fields))
                .map_err(|e| AppError::Validation(format!("Invalid form payload: {}", e)))?;
            Ok(Self { data, imagen })
        } else {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(format!("Invalid JSON payload: {}", e)))?;
            Ok(Self { data, imagen: None })
        }
    }
}

/// List equipment
#[utoipa::path(
    get,
    path = "/equipos",
    tag = "equipos",
    security(("bearer_auth" = [])),
    params(EquipoQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_equipos(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipoQuery>,
) -> AppResult<Json<Vec<Equipo>>> {
    let equipos = state.services.equipos.list(&query).await?;
    Ok(Json(equipos))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipos/{id_equipos}",
    tag = "equipos",
    security(("bearer_auth" = [])),
    params(("id_equipos" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipo),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipo(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Equipo>> {
    let equipo = state.services.equipos.get_by_id(&id).await?;
    Ok(Json(equipo))
}

/// Create equipment (JSON or multipart with optional image)
#[utoipa::path(
    post,
    path = "/equipos",
    tag = "equipos",
    security(("bearer_auth" = [])),
    request_body = CreateEquipo,
    responses(
        (status = 201, description = "Equipment created", body = Equipo),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Equipment already exists")
    )
)]
pub async fn create_equipo(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: EquipoPayload<CreateEquipo>,
) -> AppResult<(StatusCode, Json<Equipo>)> {
    claims.require_write()?;

    let imagen = match payload.imagen {
        Some(img) => Some(
            state
                .services
                .uploads
                .save_imagen(&img.filename, &img.bytes)
                .await?,
        ),
        None => None,
    };

    let equipo = state.services.equipos.create(payload.data, imagen).await?;
    Ok((StatusCode::CREATED, Json(equipo)))
}

/// Update equipment (JSON or multipart with optional replacement image).
/// The previous row is snapshotted into the history table; when the payload
/// carries an `auxiliares` list the equipment's peripherals are replaced as
/// a set.
#[utoipa::path(
    put,
    path = "/equipos/{id_equipos}",
    tag = "equipos",
    security(("bearer_auth" = [])),
    params(("id_equipos" = String, Path, description = "Equipment ID")),
    request_body = UpdateEquipo,
    responses(
        (status = 200, description = "Equipment updated", body = Equipo),
        (status = 400, description = "Malformed JSON sub-field"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipo(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    payload: EquipoPayload<UpdateEquipo>,
) -> AppResult<Json<Equipo>> {
    claims.require_write()?;

    let imagen = match payload.imagen {
        Some(img) => Some(
            state
                .services
                .uploads
                .save_imagen(&img.filename, &img.bytes)
                .await?,
        ),
        None => None,
    };

    let equipo = state
        .services
        .equipos
        .update(&id, payload.data, imagen)
        .await?;
    Ok(Json(equipo))
}

/// Delete equipment and its peripherals, snapshotting everything first
#[utoipa::path(
    delete,
    path = "/equipos/{id_equipos}",
    tag = "equipos",
    security(("bearer_auth" = [])),
    params(("id_equipos" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted", body = MessageResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipo(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_write()?;
    state.services.equipos.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: format!("Equipo {} eliminado", id),
    }))
}

/// Equipment history, most recent operation first
#[utoipa::path(
    get,
    path = "/equipos/{id_equipos}/historial",
    tag = "equipos",
    security(("bearer_auth" = [])),
    params(("id_equipos" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "History rows, possibly empty", body = Vec<EquipoHistorial>)
    )
)]
pub async fn get_historial(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<EquipoHistorial>>> {
    let historial = state.services.equipos.historial(&id).await?;
    Ok(Json(historial))
}
