//! Mobile phone (celular) model

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

static IMEI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{15}$").unwrap());

/// An IMEI is exactly 15 digits
pub fn validate_imei(imei: &str) -> Result<(), ValidationError> {
    if IMEI_RE.is_match(imei) {
        Ok(())
    } else {
        Err(ValidationError::new("imei"))
    }
}

/// Mobile phone record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Celular {
    pub id_celular: i32,
    pub marca: String,
    pub modelo: Option<String>,
    pub imei: String,
    #[serde(rename = "numeroTelefono")]
    pub numero_telefono: Option<String>,
    pub id_colaborador: Option<i32>,
    pub estado: String,
    pub observaciones: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create phone request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCelular {
    #[validate(length(min = 1, message = "marca is required"))]
    pub marca: String,
    pub modelo: Option<String>,
    #[validate(custom(function = validate_imei, message = "IMEI must be exactly 15 digits"))]
    pub imei: String,
    #[serde(rename = "numeroTelefono")]
    pub numero_telefono: Option<String>,
    #[serde(default, deserialize_with = "super::de_opt_i32")]
    pub id_colaborador: Option<i32>,
    pub estado: Option<String>,
    pub observaciones: Option<String>,
}

/// Update phone request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCelular {
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[validate(custom(function = validate_imei, message = "IMEI must be exactly 15 digits"))]
    pub imei: Option<String>,
    #[serde(rename = "numeroTelefono")]
    pub numero_telefono: Option<String>,
    #[serde(default, deserialize_with = "super::de_opt_i32")]
    pub id_colaborador: Option<i32>,
    pub estado: Option<String>,
    pub observaciones: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imei_de_15_digitos() {
        assert!(validate_imei("123456789012345").is_ok());
    }

    #[test]
    fn imei_corto_rechazado() {
        assert!(validate_imei("12345678901234").is_err());
    }

    #[test]
    fn imei_con_letras_rechazado() {
        assert!(validate_imei("12345678901234a").is_err());
    }
}
