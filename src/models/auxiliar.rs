//! Peripheral (auxiliar) model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Peripheral record. `id_equipo` is nullable: a NULL reference means the
/// peripheral is unassigned (spare).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Auxiliar {
    pub id_auxiliar: i32,
    pub nombre_auxiliar: String,
    pub numero_serie_aux: String,
    pub id_equipo: Option<String>,
    /// 1 = active, 0 = soft-deleted
    #[serde(rename = "estadoActivo")]
    pub estado_activo: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Auxiliar {
    pub fn es_activo(&self) -> bool {
        self.estado_activo == 1
    }
}

/// Create peripheral request (standalone creation)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuxiliar {
    #[validate(length(min = 1, message = "nombre_auxiliar is required"))]
    pub nombre_auxiliar: String,
    #[validate(length(min = 1, message = "numero_serie_aux is required"))]
    pub numero_serie_aux: String,
    /// Optional equipment reference; must point to an active equipment
    pub id_equipo: Option<String>,
}

/// Update peripheral request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAuxiliar {
    pub nombre_auxiliar: Option<String>,
    pub numero_serie_aux: Option<String>,
    pub id_equipo: Option<String>,
}

/// Reassign peripheral request. A null `id_equipo` unassigns it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReasignarAuxiliar {
    pub id_equipo: Option<String>,
}

/// One entry of the `auxiliares` replacement list carried by an equipment
/// create/update payload. Entries missing either field are skipped, not
/// rejected.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuxiliarEntrada {
    pub nombre_auxiliar: Option<String>,
    pub numero_serie_aux: Option<String>,
}

impl AuxiliarEntrada {
    /// An entry is kept only when both name and serial are non-empty
    pub fn es_valida(&self) -> bool {
        fn filled(v: &Option<String>) -> bool {
            v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
        }
        filled(&self.nombre_auxiliar) && filled(&self.numero_serie_aux)
    }
}

/// Peripheral search filters
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct AuxiliarQuery {
    pub id_equipo: Option<String>,
    /// When set, restrict to unassigned peripherals
    pub sin_asignar: Option<bool>,
    #[serde(rename = "estadoActivo")]
    pub estado_activo: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrada_completa_es_valida() {
        let e = AuxiliarEntrada {
            nombre_auxiliar: Some("Mouse".into()),
            numero_serie_aux: Some("S1".into()),
        };
        assert!(e.es_valida());
    }

    #[test]
    fn entrada_sin_serie_se_descarta() {
        let e = AuxiliarEntrada {
            nombre_auxiliar: Some("Mouse".into()),
            numero_serie_aux: None,
        };
        assert!(!e.es_valida());
    }

    #[test]
    fn entrada_con_campos_vacios_se_descarta() {
        let e = AuxiliarEntrada {
            nombre_auxiliar: Some("  ".into()),
            numero_serie_aux: Some("S1".into()),
        };
        assert!(!e.es_valida());
    }
}
