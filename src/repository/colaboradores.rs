//! Collaborator repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::colaborador::{Colaborador, CreateColaborador, UpdateColaborador},
};

#[derive(Clone)]
pub struct ColaboradoresRepository {
    pool: Pool<Postgres>,
}

impl ColaboradoresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all collaborators
    pub async fn list(&self) -> AppResult<Vec<Colaborador>> {
        let rows = sqlx::query_as::<_, Colaborador>(
            "SELECT * FROM colaboradores ORDER BY apellido, nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get collaborator by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Colaborador> {
        sqlx::query_as::<_, Colaborador>(
            "SELECT * FROM colaboradores WHERE id_colaborador = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Colaborador {} not found", id)))
    }

    /// Create a collaborator
    pub async fn create(&self, data: &CreateColaborador) -> AppResult<Colaborador> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Colaborador>(
            r#"
            INSERT INTO colaboradores (
                nombre, apellido, correo, cargo, departamento, telefono,
                activo, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $7)
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.apellido)
        .bind(&data.correo)
        .bind(&data.cargo)
        .bind(&data.departamento)
        .bind(&data.telefono)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a collaborator
    pub async fn update(&self, id: i32, data: &UpdateColaborador) -> AppResult<Colaborador> {
        let now = Utc::now();
        sqlx::query_as::<_, Colaborador>(
            r#"
            UPDATE colaboradores SET
                nombre = COALESCE($1, nombre),
                apellido = COALESCE($2, apellido),
                correo = COALESCE($3, correo),
                cargo = COALESCE($4, cargo),
                departamento = COALESCE($5, departamento),
                telefono = COALESCE($6, telefono),
                activo = COALESCE($7, activo),
                updated_at = $8
            WHERE id_colaborador = $9
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.apellido)
        .bind(&data.correo)
        .bind(&data.cargo)
        .bind(&data.departamento)
        .bind(&data.telefono)
        .bind(data.activo)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Colaborador {} not found", id)))
    }

    /// Delete a collaborator. Equipment and phone references are set to NULL
    /// by the schema.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM colaboradores WHERE id_colaborador = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Colaborador {} not found", id)));
        }
        Ok(())
    }

    /// Count active collaborators (for stats)
    pub async fn count_activos(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM colaboradores WHERE activo = TRUE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
