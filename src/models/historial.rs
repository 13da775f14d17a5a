//! Append-only audit snapshots for equipment and peripherals.
//!
//! History rows copy every business field of the live row at the moment of
//! an edit or delete. They carry no foreign key back to the live table and
//! are never updated or deleted by the application.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Operation label stamped on every history snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Operacion {
    #[serde(rename = "edicion")]
    Edicion,
    #[serde(rename = "eliminacion")]
    Eliminacion,
}

impl Operacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operacion::Edicion => "edicion",
            Operacion::Eliminacion => "eliminacion",
        }
    }
}

impl std::fmt::Display for Operacion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of an equipment row in `equipos_historial`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipoHistorial {
    pub id: i32,
    pub id_equipos: String,
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
    #[serde(rename = "componentesAdicionales")]
    pub componentes_adicionales: Option<serde_json::Value>,
    #[serde(rename = "estadoFisico")]
    pub estado_fisico: Option<String>,
    #[serde(rename = "detallesIncidentes")]
    pub detalles_incidentes: Option<String>,
    pub garantia: Option<String>,
    #[serde(rename = "fechaCompra")]
    pub fecha_compra: Option<NaiveDate>,
    pub activo: Option<String>,
    #[serde(rename = "sistemaOperativo")]
    pub sistema_operativo: Option<String>,
    pub mac: Option<String>,
    #[serde(rename = "nombreEquipo")]
    pub nombre_equipo: Option<String>,
    pub id_colaborador: Option<i32>,
    pub imagen: Option<String>,
    pub operacion: String,
    pub fecha_operacion: DateTime<Utc>,
}

/// Snapshot of a peripheral row in `auxiliares_historial`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuxiliarHistorial {
    pub id: i32,
    pub id_auxiliar: i32,
    pub nombre_auxiliar: Option<String>,
    pub numero_serie_aux: Option<String>,
    pub id_equipo: Option<String>,
    #[serde(rename = "estadoActivo")]
    pub estado_activo: Option<i16>,
    pub operacion: String,
    pub fecha_operacion: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operacion_labels() {
        assert_eq!(Operacion::Edicion.as_str(), "edicion");
        assert_eq!(Operacion::Eliminacion.to_string(), "eliminacion");
    }

    #[test]
    fn operacion_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Operacion::Edicion).unwrap(),
            "\"edicion\""
        );
    }
}
