//! Mobile phone repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::celular::{Celular, CreateCelular, UpdateCelular},
};

#[derive(Clone)]
pub struct CelularesRepository {
    pool: Pool<Postgres>,
}

impl CelularesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all phones
    pub async fn list(&self) -> AppResult<Vec<Celular>> {
        let rows = sqlx::query_as::<_, Celular>("SELECT * FROM celulares ORDER BY id_celular")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get phone by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Celular> {
        sqlx::query_as::<_, Celular>("SELECT * FROM celulares WHERE id_celular = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Celular {} not found", id)))
    }

    /// Check whether an IMEI is already registered
    pub async fn imei_exists(&self, imei: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM celulares WHERE imei = $1 AND id_celular != $2)",
            )
            .bind(imei)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM celulares WHERE imei = $1)")
                .bind(imei)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a phone
    pub async fn create(&self, data: &CreateCelular) -> AppResult<Celular> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Celular>(
            r#"
            INSERT INTO celulares (
                marca, modelo, imei, numero_telefono, id_colaborador, estado,
                observaciones, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(&data.marca)
        .bind(&data.modelo)
        .bind(&data.imei)
        .bind(&data.numero_telefono)
        .bind(data.id_colaborador)
        .bind(data.estado.as_deref().unwrap_or("Activo"))
        .bind(&data.observaciones)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a phone
    pub async fn update(&self, id: i32, data: &UpdateCelular) -> AppResult<Celular> {
        let now = Utc::now();
        sqlx::query_as::<_, Celular>(
            r#"
            UPDATE celulares SET
                marca = COALESCE($1, marca),
                modelo = COALESCE($2, modelo),
                imei = COALESCE($3, imei),
                numero_telefono = COALESCE($4, numero_telefono),
                id_colaborador = COALESCE($5, id_colaborador),
                estado = COALESCE($6, estado),
                observaciones = COALESCE($7, observaciones),
                updated_at = $8
            WHERE id_celular = $9
            RETURNING *
            "#,
        )
        .bind(&data.marca)
        .bind(&data.modelo)
        .bind(&data.imei)
        .bind(&data.numero_telefono)
        .bind(data.id_colaborador)
        .bind(&data.estado)
        .bind(&data.observaciones)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Celular {} not found", id)))
    }

    /// Delete a phone
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM celulares WHERE id_celular = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Celular {} not found", id)));
        }
        Ok(())
    }

    /// Count phones (for stats)
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM celulares")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
