//! Data models for Inventario TI

pub mod auxiliar;
pub mod celular;
pub mod colaborador;
pub mod equipo;
pub mod historial;
pub mod software;
pub mod usuario;

// Re-export commonly used types
pub use auxiliar::Auxiliar;
pub use celular::Celular;
pub use colaborador::Colaborador;
pub use equipo::Equipo;
pub use historial::{AuxiliarHistorial, EquipoHistorial, Operacion};
pub use software::{Software, SoftwareLicencia};
pub use usuario::{Usuario, UsuarioClaims};

use serde::{de, Deserialize, Deserializer};

/// Deserialize an optional integer that may arrive as a JSON number or as a
/// text form field (multipart bodies stringify everything). Empty strings
/// count as absent.
pub fn de_opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .map(|v| Some(v as i32))
            .ok_or_else(|| de::Error::custom("expected an integer")),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => {
            s.trim().parse::<i32>().map(Some).map_err(de::Error::custom)
        }
        Some(other) => Err(de::Error::custom(format!(
            "expected an integer, got {}",
            other
        ))),
    }
}

/// Deserialize an optional date that may arrive as a text form field.
/// Empty strings count as absent.
pub fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<chrono::NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
