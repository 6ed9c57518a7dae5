//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment variable
//! override for the API base URL (`FINBOARD_API_URL`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the fulfillment API, e.g. `http://localhost:8000/api/v1`.
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Tuning for the throttled advice refetcher.
#[derive(Debug, Clone, Deserialize)]
pub struct AdviceConfig {
    /// Throttle window for coalescing risk/amount changes, in milliseconds.
    #[serde(default = "default_throttle_window_ms")]
    pub throttle_window_ms: u64,
}

const fn default_throttle_window_ms() -> u64 {
    200
}

impl AdviceConfig {
    /// The throttle window as a [`Duration`].
    #[must_use]
    pub const fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_window_ms)
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            throttle_window_ms: default_throttle_window_ms(),
        }
    }
}

/// Client-side durable storage locations.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Where the bearer credential survives between runs.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
}

fn default_credentials_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finboard")
        .join("auth-token")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // Environment override wins over the config file
        if let Ok(api_url) = std::env::var("FINBOARD_API_URL") {
            config.network.api_url = api_url;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    ///
    /// The binary runs fine against a local API with no config file at all;
    /// an explicitly provided path that is missing is still an error for the
    /// caller to decide on.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            if let Ok(api_url) = std::env::var("FINBOARD_API_URL") {
                config.network.api_url = api_url;
            }
            config.validate()?;
            Ok(config)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if let Err(e) = Url::parse(&self.network.api_url) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.advice.throttle_window_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "throttle_window_ms",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                api_url: "http://localhost:8000/api/v1".into(),
            },
            logging: LoggingConfig::default(),
            advice: AdviceConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.advice.throttle_window_ms, 200);
        assert_eq!(config.logging.level, "info");
        assert!(config
            .storage
            .credentials_file
            .ends_with("finboard/auth-token"));
    }

    #[test]
    fn test_parse_minimal() {
        let config: Config = toml::from_str(
            r#"
            [network]
            api_url = "https://dashboard.example.com/api/v1"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.network.api_url,
            "https://dashboard.example.com/api/v1"
        );
        assert_eq!(config.advice.throttle_window_ms, 200);
    }

    #[test]
    fn test_parse_overrides() {
        let config: Config = toml::from_str(
            r#"
            [network]
            api_url = "http://localhost:8000/api/v1"

            [advice]
            throttle_window_ms = 500

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.advice.throttle_window_ms, 500);
        assert_eq!(config.advice.throttle_window(), Duration::from_millis(500));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.network.api_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = Config::default();
        config.advice.throttle_window_ms = 0;
        assert!(config.validate().is_err());
    }
}
