//! Application account repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::usuario::Usuario,
};

#[derive(Clone)]
pub struct UsuariosRepository {
    pool: Pool<Postgres>,
}

impl UsuariosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get account by username, None when absent
    pub async fn get_by_nombre_usuario(&self, nombre_usuario: &str) -> AppResult<Option<Usuario>> {
        let row = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE nombre_usuario = $1",
        )
        .bind(nombre_usuario)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get account by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Usuario> {
        sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Usuario {} not found", id)))
    }

    /// Create an account with an already-hashed password
    pub async fn create(
        &self,
        nombre_usuario: &str,
        password_hash: &str,
        rol: &str,
    ) -> AppResult<Usuario> {
        let now = chrono::Utc::now();
        let row = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nombre_usuario, password, rol, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(nombre_usuario)
        .bind(password_hash)
        .bind(rol)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
