//! Inventario Server - IT Asset Inventory Management
//!
//! A Rust REST API server for tracking equipment, peripherals, phones and
//! software licenses.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventario_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("inventario_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Inventario Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), config.uploads.clone());

    // Bootstrap the default admin account on a fresh database
    services
        .auth
        .ensure_default_admin()
        .await
        .expect("Failed to ensure default admin account");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads_dir = state.services.uploads.dir().to_string();

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/usuarios", post(api::auth::create_usuario))
        // Equipment
        .route("/equipos", get(api::equipos::list_equipos))
        .route("/equipos", post(api::equipos::create_equipo))
        .route("/equipos/:id_equipos", get(api::equipos::get_equipo))
        .route("/equipos/:id_equipos", put(api::equipos::update_equipo))
        .route("/equipos/:id_equipos", delete(api::equipos::delete_equipo))
        .route("/equipos/:id_equipos/historial", get(api::equipos::get_historial))
        // Peripherals
        .route("/auxiliares", get(api::auxiliares::list_auxiliares))
        .route("/auxiliares", post(api::auxiliares::create_auxiliar))
        .route("/auxiliares/:id_auxiliar", get(api::auxiliares::get_auxiliar))
        .route("/auxiliares/:id_auxiliar", put(api::auxiliares::update_auxiliar))
        .route("/auxiliares/:id_auxiliar", delete(api::auxiliares::delete_auxiliar))
        .route("/auxiliares/:id_auxiliar/restore", post(api::auxiliares::restore_auxiliar))
        .route("/auxiliares/:id_auxiliar/reasignar", put(api::auxiliares::reasignar_auxiliar))
        .route("/auxiliares/:id_auxiliar/historial", get(api::auxiliares::get_historial))
        // Collaborators
        .route("/colaboradores", get(api::colaboradores::list_colaboradores))
        .route("/colaboradores", post(api::colaboradores::create_colaborador))
        .route("/colaboradores/:id", get(api::colaboradores::get_colaborador))
        .route("/colaboradores/:id", put(api::colaboradores::update_colaborador))
        .route("/colaboradores/:id", delete(api::colaboradores::delete_colaborador))
        // Phones
        .route("/celulares", get(api::celulares::list_celulares))
        .route("/celulares", post(api::celulares::create_celular))
        .route("/celulares/:id", get(api::celulares::get_celular))
        .route("/celulares/:id", put(api::celulares::update_celular))
        .route("/celulares/:id", delete(api::celulares::delete_celular))
        // Software and licenses
        .route("/software", get(api::software::list_software))
        .route("/software", post(api::software::create_software))
        .route("/software/:id", get(api::software::get_software))
        .route("/software/:id", put(api::software::update_software))
        .route("/software/:id", delete(api::software::delete_software))
        .route("/software/:id/licencias", get(api::software::list_licencias))
        .route("/software/:id/licencias", post(api::software::create_licencia))
        .route("/licencias/:id", get(api::software::get_licencia))
        .route("/licencias/:id", put(api::software::update_licencia))
        .route("/licencias/:id", delete(api::software::delete_licencia))
        .route("/licencias/:id/equipos", post(api::software::asignar_licencia))
        .route("/licencias/:id/equipos/:id_equipos", delete(api::software::desasignar_licencia))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
