//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::usuario::{CreateUsuario, LoginRequest, Usuario},
};

use super::AuthenticatedUser;

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub usuario: UserInfo,
}

/// Public account info
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub nombre_usuario: String,
    pub rol: String,
}

impl From<Usuario> for UserInfo {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nombre_usuario: u.nombre_usuario,
            rol: u.rol,
        }
    }
}

/// Authenticate and obtain a JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, usuario) = state
        .services
        .auth
        .authenticate(&request.nombre_usuario, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        usuario: usuario.into(),
    }))
}

/// Get the authenticated account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let usuario = state.services.auth.get_usuario(&claims).await?;
    Ok(Json(usuario.into()))
}

/// Create an application account
#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = CreateUsuario,
    responses(
        (status = 201, description = "Account created", body = UserInfo),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_usuario(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateUsuario>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    claims.require_write()?;
    let usuario = state.services.auth.create_usuario(data).await?;
    Ok((StatusCode::CREATED, Json(usuario.into())))
}
