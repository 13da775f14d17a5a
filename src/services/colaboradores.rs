//! Collaborator service

use crate::{
    error::AppResult,
    models::colaborador::{Colaborador, CreateColaborador, UpdateColaborador},
    repository::Repository,
};

#[derive(Clone)]
pub struct ColaboradoresService {
    repository: Repository,
}

impl ColaboradoresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Colaborador>> {
        self.repository.colaboradores.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Colaborador> {
        self.repository.colaboradores.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateColaborador) -> AppResult<Colaborador> {
        super::validar(&data)?;
        self.repository.colaboradores.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateColaborador) -> AppResult<Colaborador> {
        super::validar(&data)?;
        self.repository.colaboradores.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.colaboradores.delete(id).await
    }
}
