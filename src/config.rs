use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "archaeology.toml";
pub const DB_PATH_ENV: &str = "ARCHAEOLOGY_DB_PATH";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
    pub owner: String,
    /// Drop and recreate the database file on every startup
    pub reset_on_startup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("archaeology.db"),
            owner: "owner_name".to_string(),
            reset_on_startup: true,
        }
    }
}

impl AppConfig {
    /// Load `archaeology.toml` from the working directory, falling back to defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?;
        config.override_db_path(std::env::var(DB_PATH_ENV).ok());
        Ok(config)
    }

    /// Apply the database location override; an empty value is ignored
    fn override_db_path(&mut self, value: Option<String>) {
        if let Some(db_path) = value.filter(|p| !p.trim().is_empty()) {
            self.storage.db_path = PathBuf::from(db_path);
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
