//! Application account model and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Account roles. `consulta` accounts are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    Consulta,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Consulta => "consulta",
        }
    }
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Rol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Rol::Admin),
            "consulta" => Ok(Rol::Consulta),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Application account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Usuario {
    pub id: i32,
    pub nombre_usuario: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub rol: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Usuario {
    pub fn rol(&self) -> Rol {
        self.rol.parse().unwrap_or(Rol::Consulta)
    }
}

/// Create account request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUsuario {
    #[validate(length(min = 3, message = "nombre_usuario must be at least 3 characters"))]
    pub nombre_usuario: String,
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
    pub rol: Option<Rol>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "nombre_usuario is required"))]
    pub nombre_usuario: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// JWT claims for authenticated accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioClaims {
    pub sub: String,
    pub user_id: i32,
    pub rol: Rol,
    pub exp: i64,
    pub iat: i64,
}

impl UsuarioClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.rol == Rol::Admin
    }

    /// Mutating endpoints require the admin role
    pub fn require_write(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rol_parse_round_trip() {
        assert_eq!("admin".parse::<Rol>().unwrap(), Rol::Admin);
        assert_eq!("Consulta".parse::<Rol>().unwrap(), Rol::Consulta);
        assert!("other".parse::<Rol>().is_err());
    }

    #[test]
    fn token_round_trip() {
        let claims = UsuarioClaims {
            sub: "admin".into(),
            user_id: 1,
            rol: Rol::Admin,
            exp: (Utc::now().timestamp()) + 3600,
            iat: Utc::now().timestamp(),
        };
        let token = claims.create_token("secret").unwrap();
        let parsed = UsuarioClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 1);
        assert!(parsed.is_admin());
        assert!(UsuarioClaims::from_token(&token, "wrong").is_err());
    }

    #[test]
    fn consulta_no_puede_escribir() {
        let claims = UsuarioClaims {
            sub: "lector".into(),
            user_id: 2,
            rol: Rol::Consulta,
            exp: (Utc::now().timestamp()) + 3600,
            iat: Utc::now().timestamp(),
        };
        assert!(claims.require_write().is_err());
    }
}
