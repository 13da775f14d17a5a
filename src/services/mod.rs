//! Business logic services

pub mod auth;
pub mod auxiliares;
pub mod celulares;
pub mod colaboradores;
pub mod equipos;
pub mod software;
pub mod stats;
pub mod uploads;

use validator::Validate;

use crate::{
    config::{AuthConfig, UploadsConfig},
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipos: equipos::EquiposService,
    pub auxiliares: auxiliares::AuxiliaresService,
    pub colaboradores: colaboradores::ColaboradoresService,
    pub celulares: celulares::CelularesService,
    pub software: software::SoftwareService,
    pub stats: stats::StatsService,
    pub uploads: uploads::UploadsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        uploads_config: UploadsConfig,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            equipos: equipos::EquiposService::new(repository.clone()),
            auxiliares: auxiliares::AuxiliaresService::new(repository.clone()),
            colaboradores: colaboradores::ColaboradoresService::new(repository.clone()),
            celulares: celulares::CelularesService::new(repository.clone()),
            software: software::SoftwareService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
            uploads: uploads::UploadsService::new(uploads_config),
        }
    }
}

/// Run derive-based payload validation, mapping failures to a 400
pub(crate) fn validar<T: Validate>(data: &T) -> AppResult<()> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
