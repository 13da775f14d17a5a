//! Software, license and assignment repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::software::{CreateLicencia, CreateSoftware, Software, SoftwareLicencia, UpdateSoftware},
};

/// License row plus its current assignment count
#[derive(Debug, Clone)]
pub struct LicenciaConCuenta {
    pub licencia: SoftwareLicencia,
    pub nb_equipos: i64,
}

#[derive(Clone)]
pub struct SoftwareRepository {
    pool: Pool<Postgres>,
}

impl SoftwareRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // SOFTWARE TITLES
    // =========================================================================

    /// List all software titles
    pub async fn list(&self) -> AppResult<Vec<Software>> {
        let rows = sqlx::query_as::<_, Software>("SELECT * FROM software ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get software by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Software> {
        sqlx::query_as::<_, Software>("SELECT * FROM software WHERE id_software = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Software {} not found", id)))
    }

    /// Create a software title
    pub async fn create(&self, data: &CreateSoftware) -> AppResult<Software> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Software>(
            r#"
            INSERT INTO software (nombre, version, fabricante, tipo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.version)
        .bind(&data.fabricante)
        .bind(&data.tipo)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a software title
    pub async fn update(&self, id: i32, data: &UpdateSoftware) -> AppResult<Software> {
        let now = Utc::now();
        sqlx::query_as::<_, Software>(
            r#"
            UPDATE software SET
                nombre = COALESCE($1, nombre),
                version = COALESCE($2, version),
                fabricante = COALESCE($3, fabricante),
                tipo = COALESCE($4, tipo),
                updated_at = $5
            WHERE id_software = $6
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.version)
        .bind(&data.fabricante)
        .bind(&data.tipo)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Software {} not found", id)))
    }

    /// Delete a software title. Its licenses and their assignments cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM software WHERE id_software = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Software {} not found", id)));
        }
        Ok(())
    }

    // =========================================================================
    // LICENSES
    // =========================================================================

    /// List licenses of a software title with their assignment counts
    pub async fn list_licencias(&self, id_software: i32) -> AppResult<Vec<LicenciaConCuenta>> {
        let rows = sqlx::query_as::<_, SoftwareLicencia>(
            "SELECT * FROM software_licencias WHERE id_software = $1 ORDER BY id_licencia",
        )
        .bind(id_software)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for licencia in rows {
            let nb_equipos = self.count_equipos(licencia.id_licencia).await?;
            result.push(LicenciaConCuenta { licencia, nb_equipos });
        }
        Ok(result)
    }

    /// Get license by ID with its assignment count
    pub async fn get_licencia(&self, id: i32) -> AppResult<LicenciaConCuenta> {
        let licencia = sqlx::query_as::<_, SoftwareLicencia>(
            "SELECT * FROM software_licencias WHERE id_licencia = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Licencia {} not found", id)))?;

        let nb_equipos = self.count_equipos(id).await?;
        Ok(LicenciaConCuenta { licencia, nb_equipos })
    }

    /// Create a license for a software title
    pub async fn create_licencia(
        &self,
        id_software: i32,
        data: &CreateLicencia,
    ) -> AppResult<SoftwareLicencia> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, SoftwareLicencia>(
            r#"
            INSERT INTO software_licencias (
                id_software, clave_licencia, fecha_vencimiento, max_equipos,
                compartida, costo, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(id_software)
        .bind(&data.clave_licencia)
        .bind(data.fecha_vencimiento)
        .bind(data.max_equipos)
        .bind(data.compartida.unwrap_or(false))
        .bind(data.costo)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a license
    pub async fn update_licencia(
        &self,
        id: i32,
        data: &CreateLicencia,
    ) -> AppResult<SoftwareLicencia> {
        let now = Utc::now();
        sqlx::query_as::<_, SoftwareLicencia>(
            r#"
            UPDATE software_licencias SET
                clave_licencia = COALESCE($1, clave_licencia),
                fecha_vencimiento = COALESCE($2, fecha_vencimiento),
                max_equipos = COALESCE($3, max_equipos),
                compartida = COALESCE($4, compartida),
                costo = COALESCE($5, costo),
                updated_at = $6
            WHERE id_licencia = $7
            RETURNING *
            "#,
        )
        .bind(&data.clave_licencia)
        .bind(data.fecha_vencimiento)
        .bind(data.max_equipos)
        .bind(data.compartida)
        .bind(data.costo)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Licencia {} not found", id)))
    }

    /// Delete a license and its assignments (cascade)
    pub async fn delete_licencia(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM software_licencias WHERE id_licencia = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Licencia {} not found", id)));
        }
        Ok(())
    }

    // =========================================================================
    // ASSIGNMENTS
    // =========================================================================

    /// Number of equipment assigned to a license
    pub async fn count_equipos(&self, id_licencia: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM software_equipos WHERE id_licencia = $1")
                .bind(id_licencia)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Assign a license to an equipment
    pub async fn asignar(&self, id_licencia: i32, id_equipos: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO software_equipos (id_licencia, id_equipos)
            VALUES ($1, $2)
            ON CONFLICT (id_licencia, id_equipos) DO NOTHING
            "#,
        )
        .bind(id_licencia)
        .bind(id_equipos)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "Licencia {} is already assigned to equipo {}",
                id_licencia, id_equipos
            )));
        }
        Ok(())
    }

    /// Remove a license assignment
    pub async fn desasignar(&self, id_licencia: i32, id_equipos: &str) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM software_equipos WHERE id_licencia = $1 AND id_equipos = $2",
        )
        .bind(id_licencia)
        .bind(id_equipos)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Licencia {} is not assigned to equipo {}",
                id_licencia, id_equipos
            )));
        }
        Ok(())
    }

    /// All licenses with their assignment counts (for stats)
    pub async fn list_all_licencias(&self) -> AppResult<Vec<LicenciaConCuenta>> {
        let licencias = sqlx::query_as::<_, SoftwareLicencia>(
            "SELECT * FROM software_licencias ORDER BY id_licencia",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(licencias.len());
        for licencia in licencias {
            let nb_equipos = self.count_equipos(licencia.id_licencia).await?;
            result.push(LicenciaConCuenta { licencia, nb_equipos });
        }
        Ok(result)
    }
}
