//! Application configuration, read from `config.json` in the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, MAX_IMAGE_BYTES};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    /// Defaults to `<data_dir>/logs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    pub max_image_bytes: u64,
    /// Fill an empty catalog with the built-in materials on start-up
    pub seed_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            db_file: "material_tracker.db".to_string(),
            log_dir: None,
            max_image_bytes: MAX_IMAGE_BYTES,
            seed_catalog: true,
        }
    }
}

impl AppConfig {
    /// Read `<data_dir>/config.json`, or defaults when there is none.
    ///
    /// A relative `dataDir` inside the file is resolved against `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>) -> DomainResult<Self> {
        let data_dir = data_dir.as_ref();
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self {
                data_dir: data_dir.to_path_buf(),
                ..Self::default()
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| DomainError::persistence(format!("{}: {}", path.display(), e)))?;
        let mut config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| DomainError::validation(format!("Invalid {}: {}", path.display(), e)))?;

        config.data_dir = if config.data_dir.is_absolute() {
            config.data_dir
        } else {
            data_dir.join(&config.data_dir)
        };
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}
