//! Equipment (equipo) model and request types.
//!
//! Wire field names follow the original API contract: equipment fields are
//! camelCase (`tipoDispositivo`, `numeroSerie`, ...) while identifier fields
//! keep their legacy snake_case names (`id_equipos`, `id_colaborador`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment record as stored in the `equipos` table.
///
/// `id_equipos` is caller-chosen, unique and immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipo {
    pub id_equipos: String,
    #[serde(rename = "tipoDispositivo")]
    pub tipo_dispositivo: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[serde(rename = "numeroSerie")]
    pub numero_serie: String,
    #[serde(rename = "contrasenaEquipo")]
    pub contrasena_equipo: Option<String>,
    #[serde(rename = "memoriaRam")]
    pub memoria_ram: Option<String>,
    #[serde(rename = "discoDuro")]
    pub disco_duro: Option<String>,
    #[serde(rename = "tarjetaMadre")]
    pub tarjeta_madre: Option<String>,
    #[serde(rename = "tarjetaGrafica")]
    pub tarjeta_grafica: Option<String>,
    pub procesador: Option<String>,
    /// Ordered list of `{nombre, valor}` entries, stored as JSONB
    #[serde(rename = "componentesAdicionales")]
    pub componentes_adicionales: Option<serde_json::Value>,
    #[serde(rename = "estadoFisico")]
    pub estado_fisico: Option<String>,
    #[serde(rename = "detallesIncidentes")]
    pub detalles_incidentes: Option<String>,
    pub garantia: Option<String>,
    #[serde(rename = "fechaCompra")]
    pub fecha_compra: Option<NaiveDate>,
    /// Active-status string, `"Activo"` on creation
    pub activo: String,
    #[serde(rename = "sistemaOperativo")]
    pub sistema_operativo: Option<String>,
    pub mac: Option<String>,
    #[serde(rename = "nombreEquipo")]
    pub nombre_equipo: Option<String>,
    pub id_colaborador: Option<i32>,
    /// Stored path of the uploaded image, served under /uploads
    pub imagen: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipo {
    /// Whether this equipment counts as active for assignment checks
    pub fn es_activo(&self) -> bool {
        self.activo == "Activo"
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipo {
    #[validate(length(min = 1, message = "id_equipos is required"))]
    pub id_equipos: String,
    #[serde(rename = "tipoDispositivo")]
    #[validate(length(min = 1, message = "tipoDispositivo is required"))]
    pub tipo_dispositivo: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[serde(rename = "numeroSerie")]
    #[validate(length(min = 1, message = "numeroSerie is required"))]
    pub numero_serie: String,
    #[serde(rename = "contrasenaEquipo")]
    pub contrasena_equipo: Option<String>,
    #[serde(rename = "memoriaRam")]
    pub memoria_ram: Option<String>,
    #[serde(rename = "discoDuro")]
    pub disco_duro: Option<String>,
    #[serde(rename = "tarjetaMadre")]
    pub tarjeta_madre: Option<String>,
    #[serde(rename = "tarjetaGrafica")]
    pub tarjeta_grafica: Option<String>,
    pub procesador: Option<String>,
    /// JSON array or JSON-encoded string (multipart text field)
    #[serde(rename = "componentesAdicionales")]
    pub componentes_adicionales: Option<serde_json::Value>,
    #[serde(rename = "estadoFisico")]
    pub estado_fisico: Option<String>,
    #[serde(rename = "detallesIncidentes")]
    pub detalles_incidentes: Option<String>,
    pub garantia: Option<String>,
    #[serde(rename = "fechaCompra", default, deserialize_with = "super::de_opt_date")]
    pub fecha_compra: Option<NaiveDate>,
    pub activo: Option<String>,
    #[serde(rename = "sistemaOperativo")]
    pub sistema_operativo: Option<String>,
    pub mac: Option<String>,
    #[serde(rename = "nombreEquipo")]
    pub nombre_equipo: Option<String>,
    #[serde(default, deserialize_with = "super::de_opt_i32")]
    pub id_colaborador: Option<i32>,
    /// JSON array or JSON-encoded string of replacement auxiliaries
    pub auxiliares: Option<serde_json::Value>,
}

/// Update equipment request. Absent fields retain their stored values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipo {
    #[serde(rename = "tipoDispositivo")]
    pub tipo_dispositivo: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[serde(rename = "numeroSerie")]
    pub numero_serie: Option<String>,
    #[serde(rename = "contrasenaEquipo")]
    pub contrasena_equipo: Option<String>,
    #[serde(rename = "memoriaRam")]
    pub memoria_ram: Option<String>,
    #[serde(rename = "discoDuro")]
    pub disco_duro: Option<String>,
    #[serde(rename = "tarjetaMadre")]
    pub tarjeta_madre: Option<String>,
    #[serde(rename = "tarjetaGrafica")]
    pub tarjeta_grafica: Option<String>,
    pub procesador: Option<String>,
    /// JSON array or JSON-encoded string (multipart text field)
    #[serde(rename = "componentesAdicionales")]
    pub componentes_adicionales: Option<serde_json::Value>,
    #[serde(rename = "estadoFisico")]
    pub estado_fisico: Option<String>,
    #[serde(rename = "detallesIncidentes")]
    pub detalles_incidentes: Option<String>,
    pub garantia: Option<String>,
    #[serde(rename = "fechaCompra", default, deserialize_with = "super::de_opt_date")]
    pub fecha_compra: Option<NaiveDate>,
    pub activo: Option<String>,
    #[serde(rename = "sistemaOperativo")]
    pub sistema_operativo: Option<String>,
    pub mac: Option<String>,
    #[serde(rename = "nombreEquipo")]
    pub nombre_equipo: Option<String>,
    #[serde(default, deserialize_with = "super::de_opt_i32")]
    pub id_colaborador: Option<i32>,
    /// JSON array or JSON-encoded string. When present, the full set of
    /// auxiliaries of this equipment is replaced (replace-all contract:
    /// auxiliary ids are not stable across an update).
    pub auxiliares: Option<serde_json::Value>,
}

/// Equipment search filters
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct EquipoQuery {
    #[serde(rename = "tipoDispositivo")]
    pub tipo_dispositivo: Option<String>,
    pub activo: Option<String>,
    pub id_colaborador: Option<i32>,
    pub freesearch: Option<String>,
}
