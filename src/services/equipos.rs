//! Equipment service.
//!
//! Payload sub-fields that may arrive JSON-encoded (`componentesAdicionales`
//! and `auxiliares`, which multipart forms stringify) are parsed and rejected
//! here, before the repository opens its transaction; a malformed sub-field
//! never reaches the database.

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        auxiliar::AuxiliarEntrada,
        equipo::{CreateEquipo, Equipo, EquipoQuery, UpdateEquipo},
        historial::EquipoHistorial,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquiposService {
    repository: Repository,
}

impl EquiposService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List equipment with filters
    pub async fn list(&self, query: &EquipoQuery) -> AppResult<Vec<Equipo>> {
        self.repository.equipos.list(query).await
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipo> {
        self.repository.equipos.get_by_id(id).await
    }

    /// Create equipment, optionally with initial peripherals and an image
    pub async fn create(
        &self,
        mut data: CreateEquipo,
        imagen: Option<String>,
    ) -> AppResult<Equipo> {
        super::validar(&data)?;

        if self
            .repository
            .equipos
            .find_by_id(&data.id_equipos)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Equipo {} already exists",
                data.id_equipos
            )));
        }

        if let Some(id_colaborador) = data.id_colaborador {
            self.repository.colaboradores.get_by_id(id_colaborador).await?;
        }

        let componentes = data
            .componentes_adicionales
            .take()
            .map(parse_componentes)
            .transpose()?;
        let auxiliares = data
            .auxiliares
            .take()
            .map(parse_auxiliares)
            .transpose()?
            .unwrap_or_default();

        self.repository
            .equipos
            .create(&data, componentes, &auxiliares, imagen)
            .await
    }

    /// Update equipment. The snapshot/replace orchestration runs in the
    /// repository; this layer resolves the duck-typed sub-fields first.
    pub async fn update(
        &self,
        id: &str,
        mut data: UpdateEquipo,
        imagen: Option<String>,
    ) -> AppResult<Equipo> {
        let componentes = data
            .componentes_adicionales
            .take()
            .map(parse_componentes)
            .transpose()?;
        let auxiliares = data
            .auxiliares
            .take()
            .map(parse_auxiliares)
            .transpose()?;

        if let Some(id_colaborador) = data.id_colaborador {
            self.repository.colaboradores.get_by_id(id_colaborador).await?;
        }

        self.repository
            .equipos
            .update(id, &data, componentes, auxiliares.as_deref(), imagen)
            .await
    }

    /// Delete equipment and its peripherals (history-preserving)
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.equipos.delete(id).await
    }

    /// Equipment history, newest first
    pub async fn historial(&self, id: &str) -> AppResult<Vec<EquipoHistorial>> {
        self.repository.equipos.historial(id).await
    }
}

/// Normalize `componentesAdicionales`: a JSON value passes through, a string
/// must itself parse as JSON.
fn parse_componentes(value: Value) -> AppResult<Value> {
    match value {
        Value::String(s) => serde_json::from_str(&s).map_err(|e| {
            AppError::Validation(format!("componentesAdicionales is not valid JSON: {}", e))
        }),
        other => Ok(other),
    }
}

/// Normalize the `auxiliares` replacement list: accepts a JSON array or a
/// JSON-encoded string of one.
fn parse_auxiliares(value: Value) -> AppResult<Vec<AuxiliarEntrada>> {
    let value = match value {
        Value::String(s) => serde_json::from_str::<Value>(&s).map_err(|e| {
            AppError::Validation(format!("auxiliares is not valid JSON: {}", e))
        })?,
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("auxiliares is not a valid list: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn componentes_acepta_array() {
        let v = json!([{"nombre": "SSD extra", "valor": "1TB"}]);
        assert_eq!(parse_componentes(v.clone()).unwrap(), v);
    }

    #[test]
    fn componentes_acepta_string_json() {
        let v = Value::String(r#"[{"nombre":"RAM","valor":"16GB"}]"#.into());
        let parsed = parse_componentes(v).unwrap();
        assert_eq!(parsed, json!([{"nombre":"RAM","valor":"16GB"}]));
    }

    #[test]
    fn componentes_string_invalido_es_error_de_validacion() {
        let v = Value::String("not json {".into());
        match parse_componentes(v) {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn auxiliares_acepta_array() {
        let v = json!([{"nombre_auxiliar": "Mouse", "numero_serie_aux": "S1"}]);
        let parsed = parse_auxiliares(v).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].es_valida());
    }

    #[test]
    fn auxiliares_acepta_string_json_y_entradas_incompletas() {
        let v = Value::String(
            r#"[{"nombre_auxiliar":"Teclado","numero_serie_aux":"S2"},{"nombre_auxiliar":"Sin serie"}]"#
                .into(),
        );
        let parsed = parse_auxiliares(v).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].es_valida());
        assert!(!parsed[1].es_valida());
    }

    #[test]
    fn auxiliares_string_invalido_es_error_de_validacion() {
        let v = Value::String("[{".into());
        assert!(matches!(parse_auxiliares(v), Err(AppError::Validation(_))));
    }

    #[test]
    fn auxiliares_no_lista_es_error_de_validacion() {
        let v = json!({"nombre_auxiliar": "Mouse"});
        assert!(matches!(parse_auxiliares(v), Err(AppError::Validation(_))));
    }
}
