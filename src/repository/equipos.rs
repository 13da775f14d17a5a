//! Equipment repository.
//!
//! Update and delete are the history-preserving orchestrators: every
//! multi-row sequence runs inside a single transaction so the live tables
//! and the history tables move together or not at all.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::historial::{snapshot_auxiliar, snapshot_equipo};
use crate::{
    error::{AppError, AppResult},
    models::{
        auxiliar::{Auxiliar, AuxiliarEntrada},
        equipo::{CreateEquipo, Equipo, EquipoQuery, UpdateEquipo},
        historial::{EquipoHistorial, Operacion},
    },
};

#[derive(Clone)]
pub struct EquiposRepository {
    pool: Pool<Postgres>,
}

impl EquiposRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List equipment with optional filters
    pub async fn list(&self, query: &EquipoQuery) -> AppResult<Vec<Equipo>> {
        let rows = sqlx::query_as::<_, Equipo>(
            r#"
            SELECT * FROM equipos
            WHERE ($1::text IS NULL OR tipo_dispositivo = $1)
              AND ($2::text IS NULL OR activo = $2)
              AND ($3::int IS NULL OR id_colaborador = $3)
              AND ($4::text IS NULL OR (
                    id_equipos ILIKE '%' || $4 || '%'
                 OR numero_serie ILIKE '%' || $4 || '%'
                 OR marca ILIKE '%' || $4 || '%'
                 OR modelo ILIKE '%' || $4 || '%'
                 OR nombre_equipo ILIKE '%' || $4 || '%'))
            ORDER BY id_equipos
            "#,
        )
        .bind(&query.tipo_dispositivo)
        .bind(&query.activo)
        .bind(query.id_colaborador)
        .bind(&query.freesearch)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipo> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipo {} not found", id)))
    }

    /// Get equipment by ID, None when absent
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Equipo>> {
        let row = sqlx::query_as::<_, Equipo>("SELECT * FROM equipos WHERE id_equipos = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create equipment, optionally with its initial peripherals, in one
    /// transaction. Creation writes no history.
    pub async fn create(
        &self,
        data: &CreateEquipo,
        componentes: Option<serde_json::Value>,
        auxiliares: &[AuxiliarEntrada],
        imagen: Option<String>,
    ) -> AppResult<Equipo> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let equipo = sqlx::query_as::<_, Equipo>(
            r#"
            INSERT INTO equipos (
                id_equipos, tipo_dispositivo, marca, modelo, numero_serie,
                contrasena_equipo, memoria_ram, disco_duro, tarjeta_madre,
                tarjeta_grafica, procesador, componentes_adicionales,
                estado_fisico, detalles_incidentes, garantia, fecha_compra,
                activo, sistema_operativo, mac, nombre_equipo, id_colaborador,
                imagen, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $23
            )
            RETURNING *
            "#,
        )
        .bind(&data.id_equipos)
        .bind(&data.tipo_dispositivo)
        .bind(&data.marca)
        .bind(&data.modelo)
        .bind(&data.numero_serie)
        .bind(&data.contrasena_equipo)
        .bind(&data.memoria_ram)
        .bind(&data.disco_duro)
        .bind(&data.tarjeta_madre)
        .bind(&data.tarjeta_grafica)
        .bind(&data.procesador)
        .bind(componentes)
        .bind(&data.estado_fisico)
        .bind(&data.detalles_incidentes)
        .bind(&data.garantia)
        .bind(data.fecha_compra)
        .bind(data.activo.as_deref().unwrap_or("Activo"))
        .bind(&data.sistema_operativo)
        .bind(&data.mac)
        .bind(&data.nombre_equipo)
        .bind(data.id_colaborador)
        .bind(&imagen)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        insert_auxiliares(&mut tx, &equipo.id_equipos, auxiliares).await?;

        tx.commit().await?;
        Ok(equipo)
    }

    // =========================================================================
    // UPDATE (history-preserving orchestrator)
    // =========================================================================

    /// Update equipment. Snapshots the current row into `equipos_historial`
    /// before overwriting it; when `auxiliares` is present the full set of
    /// peripherals of this equipment is snapshotted, deleted and replaced by
    /// the given entries (replace-all: peripheral ids are not stable across
    /// an update). Absent payload fields retain their stored values.
    pub async fn update(
        &self,
        id: &str,
        data: &UpdateEquipo,
        componentes: Option<serde_json::Value>,
        auxiliares: Option<&[AuxiliarEntrada]>,
        imagen: Option<String>,
    ) -> AppResult<Equipo> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let actual = sqlx::query_as::<_, Equipo>("SELECT * FROM equipos WHERE id_equipos = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipo {} not found", id)))?;

        snapshot_equipo(&mut tx, &actual, Operacion::Edicion).await?;

        let equipo = sqlx::query_as::<_, Equipo>(
            r#"
            UPDATE equipos SET
                tipo_dispositivo = COALESCE($1, tipo_dispositivo),
                marca = COALESCE($2, marca),
                modelo = COALESCE($3, modelo),
                numero_serie = COALESCE($4, numero_serie),
                contrasena_equipo = COALESCE($5, contrasena_equipo),
                memoria_ram = COALESCE($6, memoria_ram),
                disco_duro = COALESCE($7, disco_duro),
                tarjeta_madre = COALESCE($8, tarjeta_madre),
                tarjeta_grafica = COALESCE($9, tarjeta_grafica),
                procesador = COALESCE($10, procesador),
                componentes_adicionales = COALESCE($11, componentes_adicionales),
                estado_fisico = COALESCE($12, estado_fisico),
                detalles_incidentes = COALESCE($13, detalles_incidentes),
                garantia = COALESCE($14, garantia),
                fecha_compra = COALESCE($15, fecha_compra),
                activo = COALESCE($16, activo),
                sistema_operativo = COALESCE($17, sistema_operativo),
                mac = COALESCE($18, mac),
                nombre_equipo = COALESCE($19, nombre_equipo),
                id_colaborador = COALESCE($20, id_colaborador),
                imagen = COALESCE($21, imagen),
                updated_at = $22
            WHERE id_equipos = $23
            RETURNING *
            "#,
        )
        .bind(&data.tipo_dispositivo)
        .bind(&data.marca)
        .bind(&data.modelo)
        .bind(&data.numero_serie)
        .bind(&data.contrasena_equipo)
        .bind(&data.memoria_ram)
        .bind(&data.disco_duro)
        .bind(&data.tarjeta_madre)
        .bind(&data.tarjeta_grafica)
        .bind(&data.procesador)
        .bind(componentes)
        .bind(&data.estado_fisico)
        .bind(&data.detalles_incidentes)
        .bind(&data.garantia)
        .bind(data.fecha_compra)
        .bind(&data.activo)
        .bind(&data.sistema_operativo)
        .bind(&data.mac)
        .bind(&data.nombre_equipo)
        .bind(data.id_colaborador)
        .bind(&imagen)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(entradas) = auxiliares {
            let actuales = auxiliares_de_equipo(&mut tx, id).await?;
            for auxiliar in &actuales {
                snapshot_auxiliar(&mut tx, auxiliar, Operacion::Edicion).await?;
            }

            sqlx::query("DELETE FROM auxiliares WHERE id_equipo = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            insert_auxiliares(&mut tx, id, entradas).await?;
        }

        tx.commit().await?;
        Ok(equipo)
    }

    // =========================================================================
    // DELETE (history-preserving orchestrator)
    // =========================================================================

    /// Delete equipment and its peripherals, snapshotting every row with
    /// `eliminacion` first. All of it happens in one transaction.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let equipo = sqlx::query_as::<_, Equipo>("SELECT * FROM equipos WHERE id_equipos = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipo {} not found", id)))?;

        snapshot_equipo(&mut tx, &equipo, Operacion::Eliminacion).await?;

        let auxiliares = auxiliares_de_equipo(&mut tx, id).await?;
        for auxiliar in &auxiliares {
            snapshot_auxiliar(&mut tx, auxiliar, Operacion::Eliminacion).await?;
        }

        sqlx::query("DELETE FROM auxiliares WHERE id_equipo = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM equipos WHERE id_equipos = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    // HISTORY
    // =========================================================================

    /// All history rows of an equipment, most recent operation first.
    /// An unknown id yields an empty list, not an error.
    pub async fn historial(&self, id: &str) -> AppResult<Vec<EquipoHistorial>> {
        let rows = sqlx::query_as::<_, EquipoHistorial>(
            "SELECT * FROM equipos_historial WHERE id_equipos = $1 ORDER BY fecha_operacion DESC, id DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // =========================================================================
    // STATS
    // =========================================================================

    /// Equipment counts grouped by the `activo` status string
    pub async fn count_by_estado(&self) -> AppResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT activo, COUNT(*) FROM equipos GROUP BY activo ORDER BY activo")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}

/// Load all peripherals referencing an equipment, on the caller's transaction
async fn auxiliares_de_equipo(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id_equipo: &str,
) -> AppResult<Vec<Auxiliar>> {
    let rows = sqlx::query_as::<_, Auxiliar>(
        "SELECT * FROM auxiliares WHERE id_equipo = $1 ORDER BY id_auxiliar",
    )
    .bind(id_equipo)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows)
}

/// Insert one peripheral row per valid replacement entry, each referencing
/// the given equipment. Entries missing a name or serial are skipped.
async fn insert_auxiliares(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id_equipo: &str,
    entradas: &[AuxiliarEntrada],
) -> AppResult<()> {
    let now = Utc::now();
    for entrada in entradas.iter().filter(|e| e.es_valida()) {
        sqlx::query(
            r#"
            INSERT INTO auxiliares (
                nombre_auxiliar, numero_serie_aux, id_equipo, estado_activo,
                created_at, updated_at
            ) VALUES ($1, $2, $3, 1, $4, $4)
            "#,
        )
        .bind(entrada.nombre_auxiliar.as_deref().map(str::trim))
        .bind(entrada.numero_serie_aux.as_deref().map(str::trim))
        .bind(id_equipo)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
