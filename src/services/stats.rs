//! Inventory statistics service

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::software::EstadoLicencia,
    repository::Repository,
};

/// One `activo`-status bucket of the equipment inventory
#[derive(Debug, Serialize, ToSchema)]
pub struct EstadoEquipos {
    pub estado: String,
    pub total: i64,
}

/// License counts per derived state
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct EstadoLicencias {
    pub activas: i64,
    pub sin_uso: i64,
    pub por_vencer: i64,
    pub vencidas: i64,
}

/// Dashboard counters
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub equipos: Vec<EstadoEquipos>,
    pub auxiliares_sin_asignar: i64,
    pub celulares: i64,
    pub colaboradores_activos: i64,
    pub licencias: EstadoLicencias,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Gather the dashboard counters
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let equipos = self
            .repository
            .equipos
            .count_by_estado()
            .await?
            .into_iter()
            .map(|(estado, total)| EstadoEquipos { estado, total })
            .collect();

        let auxiliares_sin_asignar = self.repository.auxiliares.count_sin_asignar().await?;
        let celulares = self.repository.celulares.count().await?;
        let colaboradores_activos = self.repository.colaboradores.count_activos().await?;

        let hoy = Utc::now().date_naive();
        let mut licencias = EstadoLicencias::default();
        for l in self.repository.software.list_all_licencias().await? {
            match EstadoLicencia::derivar(l.licencia.fecha_vencimiento, l.nb_equipos, hoy) {
                EstadoLicencia::Activo => licencias.activas += 1,
                EstadoLicencia::SinUso => licencias.sin_uso += 1,
                EstadoLicencia::PorVencer => licencias.por_vencer += 1,
                EstadoLicencia::Vencido => licencias.vencidas += 1,
            }
        }

        Ok(StatsResponse {
            equipos,
            auxiliares_sin_asignar,
            celulares,
            colaboradores_activos,
            licencias,
        })
    }
}
