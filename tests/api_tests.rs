//! API integration tests.
//!
//! These run against a live server with a migrated database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so test rows do not collide across runs
fn unique_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "nombre_usuario": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_equipo(client: &Client, token: &str, id: &str, extra: Value) -> Value {
    let mut payload = json!({
        "id_equipos": id,
        "tipoDispositivo": "Laptop",
        "numeroSerie": format!("SN-{}", id)
    });
    if let (Some(obj), Some(extra)) = (payload.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            obj.insert(k.clone(), v.clone());
        }
    }

    let response = client
        .post(format!("{}/equipos", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse create response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "nombre_usuario": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "nombre_usuario": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipos", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

/// Updating one field snapshots the previous values into the history table
#[tokio::test]
#[ignore]
async fn test_update_equipo_writes_historial() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let id = unique_id("EQ-HIST");

    create_equipo(&client, &token, &id, json!({})).await;

    let response = client
        .put(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "marca": "Dell" }))
        .send()
        .await
        .expect("Failed to send update request");

    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["marca"], "Dell");

    let response = client
        .get(format!("{}/equipos/{}/historial", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send historial request");

    assert_eq!(response.status(), 200);
    let historial: Value = response.json().await.expect("Failed to parse historial");
    let rows = historial.as_array().expect("historial is not an array");
    assert_eq!(rows.len(), 1);
    // The snapshot holds the pre-update values
    assert_eq!(rows[0]["operacion"], "edicion");
    assert!(rows[0]["marca"].is_null());

    // Cleanup
    let _ = client
        .delete(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

/// An `auxiliares` list in the update payload replaces the whole set
#[tokio::test]
#[ignore]
async fn test_update_equipo_replaces_auxiliares() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let id = unique_id("EQ-AUX");

    create_equipo(
        &client,
        &token,
        &id,
        json!({
            "auxiliares": [
                {"nombre_auxiliar": "A", "numero_serie_aux": "S1"},
                {"nombre_auxiliar": "B", "numero_serie_aux": "S2"}
            ]
        }),
    )
    .await;

    // Capture the ids of the peripherals about to be replaced
    let response = client
        .get(format!("{}/auxiliares?id_equipo={}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list auxiliares");
    let antes: Value = response.json().await.expect("Failed to parse auxiliares");
    let ids_antes: Vec<i64> = antes
        .as_array()
        .expect("auxiliares is not an array")
        .iter()
        .map(|a| a["id_auxiliar"].as_i64().unwrap())
        .collect();
    assert_eq!(ids_antes.len(), 2);

    let response = client
        .put(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "auxiliares": [
                {"nombre_auxiliar": "C", "numero_serie_aux": "S3"},
                {"nombre_auxiliar": "incompleta"}
            ]
        }))
        .send()
        .await
        .expect("Failed to send update request");

    assert_eq!(response.status(), 200);

    // Each replaced peripheral left an `edicion` snapshot behind
    for id_auxiliar in &ids_antes {
        let response = client
            .get(format!("{}/auxiliares/{}/historial", BASE_URL, id_auxiliar))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to fetch auxiliar historial");
        let historial: Value = response.json().await.expect("Failed to parse historial");
        let rows = historial.as_array().expect("historial is not an array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["operacion"], "edicion");
    }

    let response = client
        .get(format!("{}/auxiliares?id_equipo={}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list auxiliares");

    let auxiliares: Value = response.json().await.expect("Failed to parse auxiliares");
    let rows = auxiliares.as_array().expect("auxiliares is not an array");
    // Replace-all: only the complete replacement entry survives
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["nombre_auxiliar"], "C");
    assert_eq!(rows[0]["numero_serie_aux"], "S3");

    // Cleanup
    let _ = client
        .delete(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

/// A malformed componentesAdicionales string is rejected without touching
/// the stored row
#[tokio::test]
#[ignore]
async fn test_update_equipo_rejects_bad_componentes() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let id = unique_id("EQ-COMP");

    create_equipo(
        &client,
        &token,
        &id,
        json!({
            "componentesAdicionales": [{"nombre": "SSD", "valor": "1TB"}]
        }),
    )
    .await;

    let response = client
        .put(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "componentesAdicionales": "not valid json {" }))
        .send()
        .await
        .expect("Failed to send update request");

    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch equipo");

    let equipo: Value = response.json().await.expect("Failed to parse equipo");
    assert_eq!(
        equipo["componentesAdicionales"],
        json!([{"nombre": "SSD", "valor": "1TB"}])
    );

    // No history row was written for the rejected update
    let response = client
        .get(format!("{}/equipos/{}/historial", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch historial");
    let historial: Value = response.json().await.expect("Failed to parse historial");
    assert_eq!(historial.as_array().map(Vec::len), Some(0));

    // Cleanup
    let _ = client
        .delete(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

/// Deleting equipment removes it and leaves `eliminacion` snapshots behind
#[tokio::test]
#[ignore]
async fn test_delete_equipo_keeps_history() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let id = unique_id("EQ-DEL");

    create_equipo(
        &client,
        &token,
        &id,
        json!({
            "auxiliares": [{"nombre_auxiliar": "Dock", "numero_serie_aux": "D1"}]
        }),
    )
    .await;

    let response = client
        .delete(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send delete request");

    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch equipo");
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/equipos/{}/historial", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch historial");
    let historial: Value = response.json().await.expect("Failed to parse historial");
    let rows = historial.as_array().expect("historial is not an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["operacion"], "eliminacion");
}

/// Deleting a nonexistent equipment is a 404 and writes nothing
#[tokio::test]
#[ignore]
async fn test_delete_missing_equipo_is_404() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let id = unique_id("EQ-MISSING");

    let response = client
        .delete(format!("{}/equipos/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send delete request");

    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/equipos/{}/historial", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch historial");
    let historial: Value = response.json().await.expect("Failed to parse historial");
    assert_eq!(historial.as_array().map(Vec::len), Some(0));
}

/// Spare peripheral lifecycle: create, soft-delete, restore, reassign
#[tokio::test]
#[ignore]
async fn test_auxiliar_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let id_equipo = unique_id("EQ-LIFE");

    create_equipo(&client, &token, &id_equipo, json!({})).await;

    // Spare peripheral (no equipment)
    let response = client
        .post(format!("{}/auxiliares", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "nombre_auxiliar": "Monitor",
            "numero_serie_aux": unique_id("MON")
        }))
        .send()
        .await
        .expect("Failed to create auxiliar");
    assert_eq!(response.status(), 201);
    let auxiliar: Value = response.json().await.expect("Failed to parse auxiliar");
    let id_auxiliar = auxiliar["id_auxiliar"].as_i64().expect("No auxiliar id");
    assert!(auxiliar["id_equipo"].is_null());
    assert_eq!(auxiliar["estadoActivo"], 1);

    // Assign to the equipment
    let response = client
        .put(format!("{}/auxiliares/{}/reasignar", BASE_URL, id_auxiliar))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "id_equipo": id_equipo }))
        .send()
        .await
        .expect("Failed to reassign auxiliar");
    assert_eq!(response.status(), 200);
    let auxiliar: Value = response.json().await.expect("Failed to parse auxiliar");
    assert_eq!(auxiliar["id_equipo"], id_equipo.as_str());

    // Soft-delete
    let response = client
        .delete(format!("{}/auxiliares/{}", BASE_URL, id_auxiliar))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to soft-delete auxiliar");
    assert_eq!(response.status(), 200);
    let auxiliar: Value = response.json().await.expect("Failed to parse auxiliar");
    assert_eq!(auxiliar["estadoActivo"], 0);

    // Restore succeeds while the equipment is active
    let response = client
        .post(format!("{}/auxiliares/{}/restore", BASE_URL, id_auxiliar))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to restore auxiliar");
    assert_eq!(response.status(), 200);
    let auxiliar: Value = response.json().await.expect("Failed to parse auxiliar");
    assert_eq!(auxiliar["estadoActivo"], 1);

    // Deactivate the equipment, soft-delete again: restore must now refuse
    let response = client
        .put(format!("{}/equipos/{}", BASE_URL, id_equipo))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "activo": "Baja" }))
        .send()
        .await
        .expect("Failed to deactivate equipo");
    assert_eq!(response.status(), 200);

    let _ = client
        .delete(format!("{}/auxiliares/{}", BASE_URL, id_auxiliar))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;

    let response = client
        .post(format!("{}/auxiliares/{}/restore", BASE_URL, id_auxiliar))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send restore request");
    assert_eq!(response.status(), 400);

    // Cleanup
    let _ = client
        .delete(format!("{}/equipos/{}", BASE_URL, id_equipo))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_celular_imei_validation() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/celulares", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "marca": "Samsung",
            "imei": "not-an-imei"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["equipos"].is_array());
    assert!(body["celulares"].is_number());
    assert!(body["licencias"]["vencidas"].is_number());
}
