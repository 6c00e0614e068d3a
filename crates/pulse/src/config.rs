//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pulse_server::ServerConfig;

use crate::error::{AppError, AppResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file is
    /// missing. The `PORT` environment variable overrides the configured
    /// listen port.
    pub fn load(path: &str) -> AppResult<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Self::default()
        };

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid PORT value: {port}")))?;
        }

        Ok(config)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_section_absent() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.tick_interval_ms, 2500);
    }

    #[test]
    fn parses_server_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 3000
            tick_interval_ms = 1000
            default_message = "Event triggered!"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.tick_interval_ms, 1000);
        assert_eq!(config.server.default_message, "Event triggered!");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        // No other test in this crate touches PORT
        std::env::remove_var("PORT");
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn from_file_rejects_invalid_toml() {
        let dir = std::env::temp_dir().join("pulse-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[server\nport = oops").unwrap();

        let err = AppConfig::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
