//! Inventario TI - IT Asset Inventory Management
//!
//! A Rust implementation of the Inventario TI backend, providing a REST JSON
//! API for tracking equipment, peripherals, mobile phones, software licenses
//! and the collaborators they are assigned to.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
