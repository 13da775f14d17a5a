//! Software and license service.
//!
//! License reads attach the derived state (`activo` / `sin uso` /
//! `por vencer` / `vencido`) computed from expiry and assignment count.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::software::{
        CreateLicencia, CreateSoftware, EstadoLicencia, LicenciaConEstado, Software,
        SoftwareLicencia, UpdateSoftware,
    },
    repository::{software::LicenciaConCuenta, Repository},
};

#[derive(Clone)]
pub struct SoftwareService {
    repository: Repository,
}

impl SoftwareService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Software>> {
        self.repository.software.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Software> {
        self.repository.software.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateSoftware) -> AppResult<Software> {
        super::validar(&data)?;
        self.repository.software.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateSoftware) -> AppResult<Software> {
        self.repository.software.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.software.delete(id).await
    }

    /// Licenses of a software title with derived state
    pub async fn list_licencias(&self, id_software: i32) -> AppResult<Vec<LicenciaConEstado>> {
        self.repository.software.get_by_id(id_software).await?;
        let licencias = self.repository.software.list_licencias(id_software).await?;
        Ok(licencias.into_iter().map(con_estado).collect())
    }

    pub async fn get_licencia(&self, id: i32) -> AppResult<LicenciaConEstado> {
        let licencia = self.repository.software.get_licencia(id).await?;
        Ok(con_estado(licencia))
    }

    pub async fn create_licencia(
        &self,
        id_software: i32,
        data: CreateLicencia,
    ) -> AppResult<SoftwareLicencia> {
        self.repository.software.get_by_id(id_software).await?;
        self.repository.software.create_licencia(id_software, &data).await
    }

    pub async fn update_licencia(&self, id: i32, data: CreateLicencia) -> AppResult<SoftwareLicencia> {
        self.repository.software.get_licencia(id).await?;
        self.repository.software.update_licencia(id, &data).await
    }

    pub async fn delete_licencia(&self, id: i32) -> AppResult<()> {
        self.repository.software.delete_licencia(id).await
    }

    /// Assign a license to an equipment. Single-seat licenses take one
    /// equipment; shared licenses are bounded by `max_equipos` when set.
    pub async fn asignar(&self, id_licencia: i32, id_equipos: &str) -> AppResult<()> {
        let LicenciaConCuenta { licencia, nb_equipos } =
            self.repository.software.get_licencia(id_licencia).await?;
        self.repository.equipos.get_by_id(id_equipos).await?;

        let limite = if licencia.compartida {
            licencia.max_equipos.map(i64::from)
        } else {
            Some(1)
        };
        if let Some(limite) = limite {
            if nb_equipos >= limite {
                return Err(AppError::Conflict(format!(
                    "Licencia {} already has {} of {} equipos assigned",
                    id_licencia, nb_equipos, limite
                )));
            }
        }

        self.repository.software.asignar(id_licencia, id_equipos).await
    }

    pub async fn desasignar(&self, id_licencia: i32, id_equipos: &str) -> AppResult<()> {
        self.repository.software.desasignar(id_licencia, id_equipos).await
    }
}

fn con_estado(l: LicenciaConCuenta) -> LicenciaConEstado {
    let hoy = Utc::now().date_naive();
    let estado = EstadoLicencia::derivar(l.licencia.fecha_vencimiento, l.nb_equipos, hoy);
    LicenciaConEstado {
        licencia: l.licencia,
        nb_equipos: l.nb_equipos,
        estado,
    }
}
