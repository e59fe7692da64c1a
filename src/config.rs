//! Configuration management for Pokepedai
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PokepedaiError, Result};

/// Production backend, used when no override is supplied in a release build
pub const PRODUCTION_BASE_URL: &str =
    "https://pokepedai-backend-api-405120827006.us-east1.run.app";

/// Local backend, used when no override is supplied in a debug build
pub const LOCAL_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Main configuration structure for Pokepedai
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session snapshot storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL override for the chat backend
    ///
    /// When unset, the production default is used in a release build and
    /// the local default otherwise.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Session snapshot storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the snapshot file
    ///
    /// When unset, the snapshot lives in the user's application data
    /// directory (or wherever `POKEPEDAI_SESSIONS_FILE` points).
    #[serde(default)]
    pub sessions_file: Option<PathBuf>,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file with environment and CLI overrides
    ///
    /// Missing config files are not an error; defaults are used with a
    /// warning. Environment variables override file values, and CLI flags
    /// override both.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed CLI arguments for overrides
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Parse configuration from a YAML file
    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PokepedaiError::Config(format!("Failed to read {}: {}", path, e)))?;

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| PokepedaiError::Config(format!("Failed to parse {}: {}", path, e)))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("POKEPEDAI_BASE_URL") {
            self.backend.base_url = Some(base_url);
        }

        if let Ok(timeout) = std::env::var("POKEPEDAI_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(seconds) => self.backend.timeout_seconds = seconds,
                Err(_) => {
                    tracing::warn!("Invalid POKEPEDAI_TIMEOUT_SECONDS value: {}", timeout);
                }
            }
        }

        if let Ok(sessions_file) = std::env::var("POKEPEDAI_SESSIONS_FILE") {
            self.storage.sessions_file = Some(PathBuf::from(sessions_file));
        }
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            self.backend.base_url = Some(base_url.clone());
        }

        if let Some(sessions_file) = &cli.sessions_file {
            self.storage.sessions_file = Some(sessions_file.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `PokepedaiError::Config` for a zero timeout or a base URL
    /// that is blank or not http(s)
    pub fn validate(&self) -> Result<()> {
        if self.backend.timeout_seconds == 0 {
            return Err(PokepedaiError::Config(
                "backend.timeout_seconds must be greater than zero".to_string(),
            )
            .into());
        }

        if let Some(base_url) = &self.backend.base_url {
            if base_url.trim().is_empty() {
                return Err(
                    PokepedaiError::Config("backend.base_url must not be blank".to_string()).into(),
                );
            }
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(PokepedaiError::Config(format!(
                    "backend.base_url must be an http(s) URL, got: {}",
                    base_url
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Resolve the effective backend base URL
    ///
    /// An explicit override (file, environment, or CLI) takes precedence;
    /// otherwise the production default is used in a release build and the
    /// local default otherwise. Trailing slashes are stripped so endpoint
    /// paths can be appended directly.
    pub fn resolve_base_url(&self) -> String {
        let url = match &self.backend.base_url {
            Some(url) => url.as_str(),
            None if cfg!(debug_assertions) => LOCAL_BASE_URL,
            None => PRODUCTION_BASE_URL,
        };
        url.trim_end_matches('/').to_string()
    }

    /// Effective request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("POKEPEDAI_BASE_URL");
        std::env::remove_var("POKEPEDAI_TIMEOUT_SECONDS");
        std::env::remove_var("POKEPEDAI_SESSIONS_FILE");
    }

    #[test]
    #[serial]
    fn test_default_config_validates() {
        clear_env();
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        clear_env();
        let config = Config::load("/nonexistent/config.yaml", &Cli::default()).unwrap();
        assert!(config.backend.base_url.is_none());
        assert_eq!(config.backend.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    #[serial]
    fn test_load_parses_yaml_file() {
        clear_env();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "backend:\n  base_url: http://example.test:9999\n  timeout_seconds: 42\n",
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://example.test:9999")
        );
        assert_eq!(config.backend.timeout_seconds, 42);
    }

    #[test]
    #[serial]
    fn test_env_vars_override_file_values() {
        clear_env();
        std::env::set_var("POKEPEDAI_BASE_URL", "http://from-env:1234");
        std::env::set_var("POKEPEDAI_TIMEOUT_SECONDS", "7");

        let config = Config::load("/nonexistent/config.yaml", &Cli::default()).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://from-env:1234")
        );
        assert_eq!(config.backend.timeout_seconds, 7);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_cli_override_beats_env() {
        clear_env();
        std::env::set_var("POKEPEDAI_BASE_URL", "http://from-env:1234");

        let cli = Cli {
            base_url: Some("http://from-cli:5678".to_string()),
            ..Cli::default()
        };
        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://from-cli:5678")
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_zero_timeout() {
        clear_env();
        let config = Config {
            backend: BackendConfig {
                base_url: None,
                timeout_seconds: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_validate_rejects_non_http_base_url() {
        clear_env();
        let config = Config {
            backend: BackendConfig {
                base_url: Some("ftp://example.test".to_string()),
                timeout_seconds: 30,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_base_url_prefers_override_and_strips_slash() {
        clear_env();
        let config = Config {
            backend: BackendConfig {
                base_url: Some("http://example.test:9999/".to_string()),
                timeout_seconds: 30,
            },
            ..Default::default()
        };
        assert_eq!(config.resolve_base_url(), "http://example.test:9999");
    }

    #[test]
    #[serial]
    fn test_resolve_base_url_default_matches_build_profile() {
        clear_env();
        let config = Config::default();
        let expected = if cfg!(debug_assertions) {
            LOCAL_BASE_URL
        } else {
            PRODUCTION_BASE_URL
        };
        assert_eq!(config.resolve_base_url(), expected);
    }

    #[test]
    #[serial]
    fn test_request_timeout_duration() {
        clear_env();
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
    }
}
