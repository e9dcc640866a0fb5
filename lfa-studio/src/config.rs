//! Runtime configuration resolution for lfa-studio
//!
//! The Groq credentials follow the same tiered resolution as the data
//! folder: database setting first (set through the API at runtime), then
//! environment variable, then the TOML config file. The bind address has
//! no database tier; it is fixed at startup.

use sqlx::SqlitePool;

use lfa_common::config::TomlConfig;
use lfa_common::Result;

use crate::db::settings;

/// Environment variable carrying the Groq API key
pub const GROQ_API_KEY_ENV: &str = "LFA_GROQ_API_KEY";

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5860";

/// Resolve the Groq API key: database setting, then environment, then TOML
pub async fn resolve_groq_api_key(
    pool: &SqlitePool,
    toml_config: &TomlConfig,
) -> Result<Option<String>> {
    if let Some(key) = settings::get_setting(pool, settings::GROQ_API_KEY).await? {
        if is_valid_key(&key) {
            tracing::debug!("Groq API key resolved from database settings");
            return Ok(Some(key));
        }
    }

    if let Ok(key) = std::env::var(GROQ_API_KEY_ENV) {
        if is_valid_key(&key) {
            tracing::debug!("Groq API key resolved from {}", GROQ_API_KEY_ENV);
            return Ok(Some(key));
        }
    }

    if let Some(key) = &toml_config.groq_api_key {
        if is_valid_key(key) {
            tracing::debug!("Groq API key resolved from TOML config");
            return Ok(Some(key.clone()));
        }
    }

    Ok(None)
}

/// Resolve the Groq model override: database setting, then TOML
pub async fn resolve_groq_model(
    pool: &SqlitePool,
    toml_config: &TomlConfig,
) -> Result<Option<String>> {
    if let Some(model) = settings::get_setting(pool, settings::GROQ_MODEL).await? {
        if !model.trim().is_empty() {
            return Ok(Some(model));
        }
    }
    Ok(toml_config.groq_model.clone())
}

/// Resolve the HTTP bind address: TOML, then the default
pub fn resolve_bind_address(toml_config: &TomlConfig) -> String {
    toml_config
        .bind_address
        .clone()
        .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
}

/// A usable key is non-empty after trimming
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validity() {
        assert!(is_valid_key("gsk_abc123"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    fn test_bind_address_default() {
        let config = TomlConfig::default();
        assert_eq!(resolve_bind_address(&config), DEFAULT_BIND_ADDRESS);

        let config = TomlConfig {
            bind_address: Some("0.0.0.0:8080".to_string()),
            ..TomlConfig::default()
        };
        assert_eq!(resolve_bind_address(&config), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_database_setting_wins_over_toml() {
        let pool = crate::db::init_memory_pool().await.unwrap();
        settings::set_setting(&pool, settings::GROQ_API_KEY, "gsk_from_db")
            .await
            .unwrap();

        let config = TomlConfig {
            groq_api_key: Some("gsk_from_toml".to_string()),
            ..TomlConfig::default()
        };
        let key = resolve_groq_api_key(&pool, &config).await.unwrap();
        assert_eq!(key.as_deref(), Some("gsk_from_db"));
    }

    #[tokio::test]
    async fn test_toml_used_when_database_empty() {
        let pool = crate::db::init_memory_pool().await.unwrap();
        let config = TomlConfig {
            groq_api_key: Some("gsk_from_toml".to_string()),
            ..TomlConfig::default()
        };
        let key = resolve_groq_api_key(&pool, &config).await.unwrap();
        assert_eq!(key.as_deref(), Some("gsk_from_toml"));
    }
}
