use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;

/// The `metadata.json` exported next to an image model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub labels: Vec<String>,
    #[serde(default = "default_image_size")]
    pub image_size: u32,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub tm_version: Option<String>,
}

fn default_image_size() -> u32 {
    224
}

impl ModelMetadata {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let metadata: ModelMetadata = serde_json::from_str(json)?;
        if metadata.labels.is_empty() {
            return Err(AppError::MetadataEmpty);
        }
        Ok(metadata)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
