//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, auxiliares, celulares, colaboradores, equipos, health, software, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventario TI API",
        version = "1.0.0",
        description = "IT Asset Inventory Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::create_usuario,
        // Equipment
        equipos::list_equipos,
        equipos::get_equipo,
        equipos::create_equipo,
        equipos::update_equipo,
        equipos::delete_equipo,
        equipos::get_historial,
        // Peripherals
        auxiliares::list_auxiliares,
        auxiliares::get_auxiliar,
        auxiliares::create_auxiliar,
        auxiliares::update_auxiliar,
        auxiliares::delete_auxiliar,
        auxiliares::restore_auxiliar,
        auxiliares::reasignar_auxiliar,
        auxiliares::get_historial,
        // Collaborators
        colaboradores::list_colaboradores,
        colaboradores::get_colaborador,
        colaboradores::create_colaborador,
        colaboradores::update_colaborador,
        colaboradores::delete_colaborador,
        // Phones
        celulares::list_celulares,
        celulares::get_celular,
        celulares::create_celular,
        celulares::update_celular,
        celulares::delete_celular,
        // Software
        software::list_software,
        software::get_software,
        software::create_software,
        software::update_software,
        software::delete_software,
        software::list_licencias,
        software::create_licencia,
        software::get_licencia,
        software::update_licencia,
        software::delete_licencia,
        software::asignar_licencia,
        software::desasignar_licencia,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            auth::UserInfo,
            crate::models::usuario::LoginRequest,
            crate::models::usuario::CreateUsuario,
            crate::models::usuario::Rol,
            // Equipment
            crate::models::equipo::Equipo,
            crate::models::equipo::CreateEquipo,
            crate::models::equipo::UpdateEquipo,
            crate::models::historial::EquipoHistorial,
            crate::models::historial::Operacion,
            // Peripherals
            crate::models::auxiliar::Auxiliar,
            crate::models::auxiliar::CreateAuxiliar,
            crate::models::auxiliar::UpdateAuxiliar,
            crate::models::auxiliar::ReasignarAuxiliar,
            crate::models::auxiliar::AuxiliarEntrada,
            crate::models::historial::AuxiliarHistorial,
            // Collaborators
            crate::models::colaborador::Colaborador,
            crate::models::colaborador::CreateColaborador,
            crate::models::colaborador::UpdateColaborador,
            // Phones
            crate::models::celular::Celular,
            crate::models::celular::CreateCelular,
            crate::models::celular::UpdateCelular,
            // Software
            crate::models::software::Software,
            crate::models::software::CreateSoftware,
            crate::models::software::UpdateSoftware,
            crate::models::software::SoftwareLicencia,
            crate::models::software::LicenciaConEstado,
            crate::models::software::CreateLicencia,
            crate::models::software::AsignarLicencia,
            crate::models::software::EstadoLicencia,
            // Stats
            crate::services::stats::StatsResponse,
            crate::services::stats::EstadoEquipos,
            crate::services::stats::EstadoLicencias,
            // Misc
            crate::api::MessageResponse,
            crate::api::health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipos", description = "Equipment management"),
        (name = "auxiliares", description = "Peripheral management"),
        (name = "colaboradores", description = "Collaborator management"),
        (name = "celulares", description = "Mobile phone management"),
        (name = "software", description = "Software and license management"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
