//! Peripheral service.
//!
//! Every write that carries an equipment reference first checks that the
//! referenced equipment exists and is active.

use crate::{
    error::{AppError, AppResult},
    models::{
        auxiliar::{Auxiliar, AuxiliarQuery, CreateAuxiliar, ReasignarAuxiliar, UpdateAuxiliar},
        historial::AuxiliarHistorial,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuxiliaresService {
    repository: Repository,
}

impl AuxiliaresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List peripherals with filters
    pub async fn list(&self, query: &AuxiliarQuery) -> AppResult<Vec<Auxiliar>> {
        self.repository.auxiliares.list(query).await
    }

    /// Get peripheral by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Auxiliar> {
        self.repository.auxiliares.get_by_id(id).await
    }

    /// Create a standalone peripheral, assigned or spare
    pub async fn create(&self, data: CreateAuxiliar) -> AppResult<Auxiliar> {
        super::validar(&data)?;
        if let Some(ref id_equipo) = data.id_equipo {
            self.check_equipo_activo(id_equipo).await?;
        }
        self.repository.auxiliares.create(&data).await
    }

    /// Update a peripheral
    pub async fn update(&self, id: i32, data: UpdateAuxiliar) -> AppResult<Auxiliar> {
        self.repository.auxiliares.get_by_id(id).await?;
        if let Some(ref id_equipo) = data.id_equipo {
            self.check_equipo_activo(id_equipo).await?;
        }
        self.repository.auxiliares.update(id, &data).await
    }

    /// Soft-delete a peripheral (`estadoActivo = 0`)
    pub async fn soft_delete(&self, id: i32) -> AppResult<Auxiliar> {
        self.repository.auxiliares.soft_delete(id).await
    }

    /// Restore a soft-deleted peripheral. Refused when its last-known
    /// equipment reference is no longer active.
    pub async fn restore(&self, id: i32) -> AppResult<Auxiliar> {
        let auxiliar = self.repository.auxiliares.get_by_id(id).await?;
        if let Some(ref id_equipo) = auxiliar.id_equipo {
            let equipo = self.repository.equipos.find_by_id(id_equipo).await?;
            let activo = equipo.map(|e| e.es_activo()).unwrap_or(false);
            if !activo {
                return Err(AppError::Validation(format!(
                    "Cannot restore auxiliar {}: equipo {} is no longer active",
                    id, id_equipo
                )));
            }
        }
        self.repository.auxiliares.restore(id).await
    }

    /// Reassign a peripheral to another equipment, or unassign it
    pub async fn reasignar(&self, id: i32, data: ReasignarAuxiliar) -> AppResult<Auxiliar> {
        self.repository.auxiliares.get_by_id(id).await?;
        if let Some(ref id_equipo) = data.id_equipo {
            self.check_equipo_activo(id_equipo).await?;
        }
        self.repository
            .auxiliares
            .reasignar(id, data.id_equipo.as_deref())
            .await
    }

    /// Peripheral history, newest first
    pub async fn historial(&self, id: i32) -> AppResult<Vec<AuxiliarHistorial>> {
        self.repository.auxiliares.historial(id).await
    }

    /// A usable equipment reference must exist and be active
    async fn check_equipo_activo(&self, id_equipo: &str) -> AppResult<()> {
        let equipo = self.repository.equipos.get_by_id(id_equipo).await?;
        if !equipo.es_activo() {
            return Err(AppError::Validation(format!(
                "Equipo {} is not active",
                id_equipo
            )));
        }
        Ok(())
    }
}
