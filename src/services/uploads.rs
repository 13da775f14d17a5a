//! Uploaded image storage.
//!
//! Images are written under the configured upload directory with a random
//! filename; the stored relative path is what equipment rows carry and what
//! the static file route serves.

use std::path::Path;

use uuid::Uuid;

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct UploadsService {
    config: UploadsConfig,
}

impl UploadsService {
    pub fn new(config: UploadsConfig) -> Self {
        Self { config }
    }

    /// Directory uploaded files live in
    pub fn dir(&self) -> &str {
        &self.config.dir
    }

    /// Persist one uploaded image, returning the stored relative path
    pub async fn save_imagen(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let filename = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.config.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

        let path = Path::new(&self.config.dir).join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store image: {}", e)))?;

        Ok(format!("{}/{}", self.config.dir.trim_end_matches('/'), filename))
    }
}
