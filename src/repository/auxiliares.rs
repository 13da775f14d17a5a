//! Peripheral repository.
//!
//! Direct lifecycle operations (outside the equipment update/delete flows)
//! follow the same snapshot-on-mutate rule: every update, soft-delete,
//! restore or reassignment snapshots the current row first, inside the same
//! transaction as the mutation.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::historial::snapshot_auxiliar;
use crate::{
    error::{AppError, AppResult},
    models::{
        auxiliar::{Auxiliar, AuxiliarQuery, CreateAuxiliar, UpdateAuxiliar},
        historial::{AuxiliarHistorial, Operacion},
    },
};

#[derive(Clone)]
pub struct AuxiliaresRepository {
    pool: Pool<Postgres>,
}

impl AuxiliaresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List peripherals with optional filters
    pub async fn list(&self, query: &AuxiliarQuery) -> AppResult<Vec<Auxiliar>> {
        let rows = sqlx::query_as::<_, Auxiliar>(
            r#"
            SELECT * FROM auxiliares
            WHERE ($1::text IS NULL OR id_equipo = $1)
              AND (NOT $2 OR id_equipo IS NULL)
              AND ($3::smallint IS NULL OR estado_activo = $3)
            ORDER BY id_auxiliar
            "#,
        )
        .bind(&query.id_equipo)
        .bind(query.sin_asignar.unwrap_or(false))
        .bind(query.estado_activo)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get peripheral by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Auxiliar> {
        sqlx::query_as::<_, Auxiliar>("SELECT * FROM auxiliares WHERE id_auxiliar = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Auxiliar {} not found", id)))
    }

    /// Create a peripheral. Creation writes no history.
    pub async fn create(&self, data: &CreateAuxiliar) -> AppResult<Auxiliar> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Auxiliar>(
            r#"
            INSERT INTO auxiliares (
                nombre_auxiliar, numero_serie_aux, id_equipo, estado_activo,
                created_at, updated_at
            ) VALUES ($1, $2, $3, 1, $4, $4)
            RETURNING *
            "#,
        )
        .bind(data.nombre_auxiliar.trim())
        .bind(data.numero_serie_aux.trim())
        .bind(&data.id_equipo)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a peripheral, snapshotting the current row first
    pub async fn update(&self, id: i32, data: &UpdateAuxiliar) -> AppResult<Auxiliar> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let actual = cargar(&mut tx, id).await?;
        snapshot_auxiliar(&mut tx, &actual, Operacion::Edicion).await?;

        let row = sqlx::query_as::<_, Auxiliar>(
            r#"
            UPDATE auxiliares SET
                nombre_auxiliar = COALESCE($1, nombre_auxiliar),
                numero_serie_aux = COALESCE($2, numero_serie_aux),
                id_equipo = COALESCE($3, id_equipo),
                updated_at = $4
            WHERE id_auxiliar = $5
            RETURNING *
            "#,
        )
        .bind(&data.nombre_auxiliar)
        .bind(&data.numero_serie_aux)
        .bind(&data.id_equipo)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Soft-delete a peripheral (`estado_activo = 0`), snapshotting first
    pub async fn soft_delete(&self, id: i32) -> AppResult<Auxiliar> {
        self.set_estado(id, 0, Operacion::Eliminacion).await
    }

    /// Restore a soft-deleted peripheral (`estado_activo = 1`).
    /// Callers check the last-known equipment reference beforehand.
    pub async fn restore(&self, id: i32) -> AppResult<Auxiliar> {
        self.set_estado(id, 1, Operacion::Edicion).await
    }

    async fn set_estado(&self, id: i32, estado: i16, operacion: Operacion) -> AppResult<Auxiliar> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let actual = cargar(&mut tx, id).await?;
        snapshot_auxiliar(&mut tx, &actual, operacion).await?;

        let row = sqlx::query_as::<_, Auxiliar>(
            "UPDATE auxiliares SET estado_activo = $1, updated_at = $2 WHERE id_auxiliar = $3 RETURNING *",
        )
        .bind(estado)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Reassign a peripheral to another equipment (or unassign with NULL),
    /// snapshotting the current row first
    pub async fn reasignar(&self, id: i32, id_equipo: Option<&str>) -> AppResult<Auxiliar> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let actual = cargar(&mut tx, id).await?;
        snapshot_auxiliar(&mut tx, &actual, Operacion::Edicion).await?;

        let row = sqlx::query_as::<_, Auxiliar>(
            "UPDATE auxiliares SET id_equipo = $1, updated_at = $2 WHERE id_auxiliar = $3 RETURNING *",
        )
        .bind(id_equipo)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// All history rows of a peripheral, most recent operation first
    pub async fn historial(&self, id: i32) -> AppResult<Vec<AuxiliarHistorial>> {
        let rows = sqlx::query_as::<_, AuxiliarHistorial>(
            "SELECT * FROM auxiliares_historial WHERE id_auxiliar = $1 ORDER BY fecha_operacion DESC, id DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count active, unassigned peripherals (for stats)
    pub async fn count_sin_asignar(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM auxiliares WHERE id_equipo IS NULL AND estado_activo = 1",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Load one peripheral on the caller's transaction, 404 when absent
async fn cargar(tx: &mut sqlx::Transaction<'_, Postgres>, id: i32) -> AppResult<Auxiliar> {
    sqlx::query_as::<_, Auxiliar>("SELECT * FROM auxiliares WHERE id_auxiliar = $1")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Auxiliar {} not found", id)))
}
