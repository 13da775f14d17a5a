//! Mobile phone service

use crate::{
    error::{AppError, AppResult},
    models::celular::{Celular, CreateCelular, UpdateCelular},
    repository::Repository,
};

#[derive(Clone)]
pub struct CelularesService {
    repository: Repository,
}

impl CelularesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Celular>> {
        self.repository.celulares.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Celular> {
        self.repository.celulares.get_by_id(id).await
    }

    /// Create a phone. The IMEI must be well-formed and unique.
    pub async fn create(&self, data: CreateCelular) -> AppResult<Celular> {
        super::validar(&data)?;
        if self.repository.celulares.imei_exists(&data.imei, None).await? {
            return Err(AppError::Conflict(format!(
                "A phone with IMEI {} already exists",
                data.imei
            )));
        }
        if let Some(id_colaborador) = data.id_colaborador {
            self.repository.colaboradores.get_by_id(id_colaborador).await?;
        }
        self.repository.celulares.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateCelular) -> AppResult<Celular> {
        super::validar(&data)?;
        if let Some(ref imei) = data.imei {
            if self.repository.celulares.imei_exists(imei, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "A phone with IMEI {} already exists",
                    imei
                )));
            }
        }
        if let Some(id_colaborador) = data.id_colaborador {
            self.repository.colaboradores.get_by_id(id_colaborador).await?;
        }
        self.repository.celulares.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.celulares.delete(id).await
    }
}
