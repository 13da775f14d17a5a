//! Repository layer for database operations

pub mod auxiliares;
pub mod celulares;
pub mod colaboradores;
pub mod equipos;
pub mod historial;
pub mod software;
pub mod usuarios;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool.
///
/// Built once in `main` from the configured pool and passed down explicitly;
/// there is no global connection state.
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipos: equipos::EquiposRepository,
    pub auxiliares: auxiliares::AuxiliaresRepository,
    pub colaboradores: colaboradores::ColaboradoresRepository,
    pub celulares: celulares::CelularesRepository,
    pub software: software::SoftwareRepository,
    pub usuarios: usuarios::UsuariosRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipos: equipos::EquiposRepository::new(pool.clone()),
            auxiliares: auxiliares::AuxiliaresRepository::new(pool.clone()),
            colaboradores: colaboradores::ColaboradoresRepository::new(pool.clone()),
            celulares: celulares::CelularesRepository::new(pool.clone()),
            software: software::SoftwareRepository::new(pool.clone()),
            usuarios: usuarios::UsuariosRepository::new(pool.clone()),
            pool,
        }
    }
}
