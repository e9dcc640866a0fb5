//! Configuration loading and data folder resolution
//!
//! Resolution priority for the data folder:
//! 1. Environment variable (`LFA_STUDIO_DATA`)
//! 2. TOML config file (`data_folder` key)
//! 3. OS-dependent compiled default

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data folder
pub const DATA_FOLDER_ENV: &str = "LFA_STUDIO_DATA";

/// TOML configuration file contents
///
/// All fields optional; missing fields fall back to defaults or
/// environment resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Data folder holding the SQLite database
    pub data_folder: Option<String>,
    /// Bind address for the HTTP server (default 127.0.0.1:5860)
    pub bind_address: Option<String>,
    /// Groq API key for the assessment client
    pub groq_api_key: Option<String>,
    /// Groq model identifier (default llama-3.3-70b-versatile)
    pub groq_model: Option<String>,
}

/// Default configuration file path for the platform
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("lfa-studio").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Load TOML config from the default location, or defaults if absent
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = default_config_path()?;
    load_toml_config_from(&path)
}

/// Load TOML config from an explicit path, or defaults if absent
pub fn load_toml_config_from(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse config failed: {}", e)))
}

/// Resolve the data folder from ENV -> TOML -> OS default
pub fn resolve_data_folder(config: &TomlConfig) -> PathBuf {
    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    if let Some(folder) = &config.data_folder {
        return PathBuf::from(folder);
    }

    default_data_folder()
}

/// OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lfa-studio"))
        .unwrap_or_else(|| PathBuf::from("./lfa_studio_data"))
}

/// Ensure the data folder exists and return the database path within it
pub fn database_path(data_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_folder)
        .map_err(|e| Error::Config(format!("Failed to create data folder: {}", e)))?;
    Ok(data_folder.join("lfa-studio.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_toml_config_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(config.data_folder.is_none());
        assert!(config.groq_api_key.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            data_folder = "/tmp/lfa"
            bind_address = "0.0.0.0:8080"
            groq_api_key = "gsk_test"
            groq_model = "llama-3.3-70b-versatile"
            "#,
        )
        .unwrap();

        let config = load_toml_config_from(&path).unwrap();
        assert_eq!(config.data_folder.as_deref(), Some("/tmp/lfa"));
        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk_test"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_folder = [not toml").unwrap();

        assert!(load_toml_config_from(&path).is_err());
    }

    #[test]
    fn test_database_path_creates_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested").join("data");
        let db = database_path(&folder).unwrap();
        assert!(folder.exists());
        assert!(db.ends_with("lfa-studio.db"));
    }
}
