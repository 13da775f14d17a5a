//! Collaborator (employee) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Collaborator record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Colaborador {
    pub id_colaborador: i32,
    pub nombre: String,
    pub apellido: String,
    pub correo: Option<String>,
    pub cargo: Option<String>,
    pub departamento: Option<String>,
    pub telefono: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create collaborator request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateColaborador {
    #[validate(length(min = 1, message = "nombre is required"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "apellido is required"))]
    pub apellido: String,
    #[validate(email(message = "Invalid email format"))]
    pub correo: Option<String>,
    pub cargo: Option<String>,
    pub departamento: Option<String>,
    pub telefono: Option<String>,
}

/// Update collaborator request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateColaborador {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub correo: Option<String>,
    pub cargo: Option<String>,
    pub departamento: Option<String>,
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}
