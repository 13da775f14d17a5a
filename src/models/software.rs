//! Software titles, licenses and license/equipment assignments.
//!
//! The license state is never stored: it is derived from the expiry date and
//! the number of equipment currently assigned (see [`EstadoLicencia`]).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Days before expiry during which a license reports `por vencer`
pub const DIAS_AVISO_VENCIMIENTO: i64 = 30;

/// Software title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Software {
    pub id_software: i32,
    pub nombre: String,
    pub version: Option<String>,
    pub fabricante: Option<String>,
    pub tipo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create software request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSoftware {
    #[validate(length(min = 1, message = "nombre is required"))]
    pub nombre: String,
    pub version: Option<String>,
    pub fabricante: Option<String>,
    pub tipo: Option<String>,
}

/// Update software request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSoftware {
    pub nombre: Option<String>,
    pub version: Option<String>,
    pub fabricante: Option<String>,
    pub tipo: Option<String>,
}

/// License record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SoftwareLicencia {
    pub id_licencia: i32,
    pub id_software: i32,
    #[serde(rename = "claveLicencia")]
    pub clave_licencia: Option<String>,
    #[serde(rename = "fechaVencimiento")]
    pub fecha_vencimiento: Option<NaiveDate>,
    /// NULL means single-seat
    #[serde(rename = "maxEquipos")]
    pub max_equipos: Option<i32>,
    pub compartida: bool,
    pub costo: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// License record plus its derived state and assignment count
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LicenciaConEstado {
    #[serde(flatten)]
    pub licencia: SoftwareLicencia,
    /// Number of equipment currently assigned to this license
    #[serde(rename = "nbEquipos")]
    pub nb_equipos: i64,
    pub estado: EstadoLicencia,
}

/// Create/update license request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLicencia {
    #[serde(rename = "claveLicencia")]
    pub clave_licencia: Option<String>,
    #[serde(rename = "fechaVencimiento", default, deserialize_with = "super::de_opt_date")]
    pub fecha_vencimiento: Option<NaiveDate>,
    #[serde(rename = "maxEquipos", default, deserialize_with = "super::de_opt_i32")]
    pub max_equipos: Option<i32>,
    pub compartida: Option<bool>,
    pub costo: Option<Decimal>,
}

/// Assign a license to one equipment
#[derive(Debug, Deserialize, ToSchema)]
pub struct AsignarLicencia {
    pub id_equipos: String,
}

/// Derived license state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EstadoLicencia {
    #[serde(rename = "activo")]
    Activo,
    #[serde(rename = "sin uso")]
    SinUso,
    #[serde(rename = "por vencer")]
    PorVencer,
    #[serde(rename = "vencido")]
    Vencido,
}

impl EstadoLicencia {
    /// Compute the state of a license from its expiry date and the number of
    /// equipment assigned to it. Expiry dominates; an unassigned license that
    /// is not expired reports `sin uso`.
    pub fn derivar(fecha_vencimiento: Option<NaiveDate>, nb_equipos: i64, hoy: NaiveDate) -> Self {
        if let Some(vence) = fecha_vencimiento {
            if vence < hoy {
                return EstadoLicencia::Vencido;
            }
            if vence - hoy <= Duration::days(DIAS_AVISO_VENCIMIENTO) {
                return EstadoLicencia::PorVencer;
            }
        }
        if nb_equipos == 0 {
            EstadoLicencia::SinUso
        } else {
            EstadoLicencia::Activo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn licencia_vencida() {
        let hoy = d("2024-06-15");
        assert_eq!(
            EstadoLicencia::derivar(Some(d("2024-06-14")), 3, hoy),
            EstadoLicencia::Vencido
        );
    }

    #[test]
    fn licencia_por_vencer_dentro_del_aviso() {
        let hoy = d("2024-06-15");
        assert_eq!(
            EstadoLicencia::derivar(Some(d("2024-07-01")), 3, hoy),
            EstadoLicencia::PorVencer
        );
    }

    #[test]
    fn licencia_sin_equipos_reporta_sin_uso() {
        let hoy = d("2024-06-15");
        assert_eq!(
            EstadoLicencia::derivar(Some(d("2025-06-15")), 0, hoy),
            EstadoLicencia::SinUso
        );
        assert_eq!(
            EstadoLicencia::derivar(None, 0, hoy),
            EstadoLicencia::SinUso
        );
    }

    #[test]
    fn licencia_asignada_y_vigente_es_activa() {
        let hoy = d("2024-06-15");
        assert_eq!(
            EstadoLicencia::derivar(Some(d("2025-06-15")), 2, hoy),
            EstadoLicencia::Activo
        );
        assert_eq!(EstadoLicencia::derivar(None, 1, hoy), EstadoLicencia::Activo);
    }

    #[test]
    fn vencimiento_domina_sobre_uso() {
        let hoy = d("2024-06-15");
        assert_eq!(
            EstadoLicencia::derivar(Some(d("2024-01-01")), 0, hoy),
            EstadoLicencia::Vencido
        );
    }
}
