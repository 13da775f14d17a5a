//! Snapshot-on-mutate helpers.
//!
//! Each helper copies one live row verbatim into its history table, stamped
//! with the operation label and the current timestamp. Both run on the
//! caller's open transaction connection: a history-write failure aborts the
//! surrounding mutation and a mutation failure discards the snapshot. The
//! source row is never touched.

use chrono::Utc;
use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{auxiliar::Auxiliar, equipo::Equipo, historial::Operacion},
};

/// Insert one `equipos_historial` snapshot of the given live row
pub async fn snapshot_equipo(
    conn: &mut PgConnection,
    equipo: &Equipo,
    operacion: Operacion,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO equipos_historial (
            id_equipos, tipo_dispositivo, marca, modelo, numero_serie,
            contrasena_equipo, memoria_ram, disco_duro, tarjeta_madre,
            tarjeta_grafica, procesador, componentes_adicionales, estado_fisico,
            detalles_incidentes, garantia, fecha_compra, activo,
            sistema_operativo, mac, nombre_equipo, id_colaborador, imagen,
            operacion, fecha_operacion
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
            $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
        )
        "#,
    )
    .bind(&equipo.id_equipos)
    .bind(&equipo.tipo_dispositivo)
    .bind(&equipo.marca)
    .bind(&equipo.modelo)
    .bind(&equipo.numero_serie)
    .bind(&equipo.contrasena_equipo)
    .bind(&equipo.memoria_ram)
    .bind(&equipo.disco_duro)
    .bind(&equipo.tarjeta_madre)
    .bind(&equipo.tarjeta_grafica)
    .bind(&equipo.procesador)
    .bind(&equipo.componentes_adicionales)
    .bind(&equipo.estado_fisico)
    .bind(&equipo.detalles_incidentes)
    .bind(&equipo.garantia)
    .bind(equipo.fecha_compra)
    .bind(&equipo.activo)
    .bind(&equipo.sistema_operativo)
    .bind(&equipo.mac)
    .bind(&equipo.nombre_equipo)
    .bind(equipo.id_colaborador)
    .bind(&equipo.imagen)
    .bind(operacion.as_str())
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

/// Insert one `auxiliares_historial` snapshot of the given live row
pub async fn snapshot_auxiliar(
    conn: &mut PgConnection,
    auxiliar: &Auxiliar,
    operacion: Operacion,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO auxiliares_historial (
            id_auxiliar, nombre_auxiliar, numero_serie_aux, id_equipo,
            estado_activo, operacion, fecha_operacion
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(auxiliar.id_auxiliar)
    .bind(&auxiliar.nombre_auxiliar)
    .bind(&auxiliar.numero_serie_aux)
    .bind(&auxiliar.id_equipo)
    .bind(auxiliar.estado_activo)
    .bind(operacion.as_str())
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}
