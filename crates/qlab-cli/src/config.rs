//! Client configuration.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config <file>`, else `~/.qlab/config.yaml` if present)
//! 2. Environment variables (with `QLAB_` prefix)
//! 3. A `.env` file in the working directory
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! ```yaml
//! backend:
//!   url: http://localhost:8000
//!   connect_timeout_seconds: 10
//!   request_timeout_seconds: 120
//! output:
//!   directory: ./qlab-out
//! logging:
//!   level: info
//! defaults:
//!   qubits: 3
//!   shots: 2048
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use qlab_adapter_http::{BACKEND_URL_ENV, DEFAULT_BASE_URL, HttpSettings};
use qlab_ir::{
    DEFAULT_NUM_QUBITS, DEFAULT_SHOTS, SUPPORTED_QUBIT_COUNTS, SUPPORTED_SHOTS,
    is_supported_qubit_count, is_supported_shots,
};

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Simulation service connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// Where exported artifacts go
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Starting circuit configuration
    #[serde(default)]
    pub defaults: CircuitDefaults,
}

/// Simulation service connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Service base URL
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Overall request timeout in seconds; unset waits indefinitely
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

/// Artifact output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for `state_vector.json` and images
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Starting circuit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDefaults {
    /// Register size
    #[serde(default = "default_qubits")]
    pub qubits: u32,

    /// Shot count
    #[serde(default = "default_shots")]
    pub shots: u32,
}

// Default value functions
fn default_backend_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_qubits() -> u32 {
    DEFAULT_NUM_QUBITS
}

fn default_shots() -> u32 {
    DEFAULT_SHOTS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CircuitDefaults {
    fn default() -> Self {
        Self {
            qubits: default_qubits(),
            shots: default_shots(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: ClientConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load `.env` if it exists
    /// 2. Load from `config_file`, or from the default path if that exists
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(path)?,
                _ => ClientConfig::default(),
            },
        };

        config = config.merge_env();

        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from `lookup`. Keys that are absent, or whose value
    /// does not parse, leave the field unchanged.
    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Backend
        if let Some(v) = lookup(BACKEND_URL_ENV) {
            self.backend.url = v;
        }
        if let Some(v) = lookup("QLAB_CONNECT_TIMEOUT") {
            if let Ok(val) = v.parse() {
                self.backend.connect_timeout_seconds = val;
            }
        }
        if let Some(v) = lookup("QLAB_REQUEST_TIMEOUT") {
            if let Ok(val) = v.parse() {
                self.backend.request_timeout_seconds = Some(val);
            }
        }

        // Output
        if let Some(v) = lookup("QLAB_OUTPUT_DIR") {
            self.output.directory = PathBuf::from(v);
        }

        // Logging
        if let Some(v) = lookup("QLAB_LOG_LEVEL") {
            self.logging.level = v;
        }

        // Circuit defaults
        if let Some(v) = lookup("QLAB_QUBITS") {
            if let Ok(val) = v.parse() {
                self.defaults.qubits = val;
            }
        }
        if let Some(v) = lookup("QLAB_SHOTS") {
            if let Ok(val) = v.parse() {
                self.defaults.shots = val;
            }
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid backend URL: {}",
                self.backend.url
            )));
        }

        if self.backend.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "connect_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.backend.request_timeout_seconds == Some(0) {
            return Err(ConfigError::ValidationError(
                "request_timeout_seconds must be greater than 0; omit it to wait indefinitely"
                    .to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        if !is_supported_qubit_count(self.defaults.qubits) {
            return Err(ConfigError::ValidationError(format!(
                "Unsupported default qubit count {}. Available: {:?}",
                self.defaults.qubits, SUPPORTED_QUBIT_COUNTS
            )));
        }
        if !is_supported_shots(self.defaults.shots) {
            return Err(ConfigError::ValidationError(format!(
                "Unsupported default shot count {}. Available: {:?}",
                self.defaults.shots, SUPPORTED_SHOTS
            )));
        }

        Ok(())
    }

    /// Transport settings for the HTTP adapter.
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_seconds),
            request_timeout: self.backend.request_timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// `~/.qlab/config.yaml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qlab").join("config.yaml"))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
