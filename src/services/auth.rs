//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::usuario::{CreateUsuario, Rol, Usuario, UsuarioClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate an account and return a JWT token with it
    pub async fn authenticate(
        &self,
        nombre_usuario: &str,
        password: &str,
    ) -> AppResult<(String, Usuario)> {
        let usuario = self
            .repository
            .usuarios
            .get_by_nombre_usuario(nombre_usuario)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !verify_password(&usuario.password, password) {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token(&usuario)?;
        Ok((token, usuario))
    }

    /// Get the account behind a set of claims
    pub async fn get_usuario(&self, claims: &UsuarioClaims) -> AppResult<Usuario> {
        self.repository.usuarios.get_by_id(claims.user_id).await
    }

    /// Create the default `admin`/`admin` account when no accounts exist yet.
    /// Called once at startup.
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        if self
            .repository
            .usuarios
            .get_by_nombre_usuario("admin")
            .await?
            .is_some()
        {
            return Ok(());
        }
        let hash = hash_password("admin")?;
        self.repository.usuarios.create("admin", &hash, Rol::Admin.as_str()).await?;
        tracing::warn!("Created default admin account; change its password");
        Ok(())
    }

    /// Create an account (admin only, enforced at the handler)
    pub async fn create_usuario(&self, data: CreateUsuario) -> AppResult<Usuario> {
        super::validar(&data)?;
        if self
            .repository
            .usuarios
            .get_by_nombre_usuario(&data.nombre_usuario)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Usuario {} already exists",
                data.nombre_usuario
            )));
        }
        let hash = hash_password(&data.password)?;
        let rol = data.rol.unwrap_or(Rol::Consulta);
        self.repository
            .usuarios
            .create(&data.nombre_usuario, &hash, rol.as_str())
            .await
    }

    fn create_token(&self, usuario: &Usuario) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = UsuarioClaims {
            sub: usuario.nombre_usuario.clone(),
            user_id: usuario.id,
            rol: usuario.rol(),
            iat: now,
            exp: now + (self.config.jwt_expiration_hours as i64) * 3600,
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Hash a password with argon2 and a fresh salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(stored_hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_y_verificacion() {
        let hash = hash_password("s3creta").unwrap();
        assert!(verify_password(&hash, "s3creta"));
        assert!(!verify_password(&hash, "otra"));
    }

    #[test]
    fn hash_invalido_no_verifica() {
        assert!(!verify_password("not-a-hash", "s3creta"));
    }
}
