//! Configuration system for the DeckGen client
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (DECKGEN_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// DeckGen service connection settings
    pub service: ServiceSettings,

    /// Job polling settings
    pub polling: PollingSettings,

    /// Data storage paths
    pub storage: StorageSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// DeckGen service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Base URL of the DeckGen API server
    pub base_url: String,

    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
}

/// Job polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    /// Interval between job status requests in milliseconds
    pub interval_ms: u64,
}

/// Storage path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Base data directory (session credentials, tour marker)
    pub data_dir: String,

    /// Directory where generated decks are saved
    pub download_dir: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service: ServiceSettings::default(),
            polling: PollingSettings::default(),
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout_ms: 30000,
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.deckgen/client".to_string(),
            download_dir: ".".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        let config_file = Self::find_config_file(config_path)?;
        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let expanded = shellexpand::tilde(path);
            let path = PathBuf::from(expanded.as_ref());
            if path.exists() {
                return Ok(Some(path));
            } else {
                return Err(Error::ConfigNotFound { path });
            }
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            PathBuf::from("deckgen.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("deckgen").join("client.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".deckgen").join("client.toml"))
                .unwrap_or_default(),
            // System config (Linux)
            PathBuf::from("/etc/deckgen/client.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Service settings
        if let Ok(val) = std::env::var("DECKGEN_SERVICE_URL") {
            self.service.base_url = val;
        }
        if let Ok(val) = std::env::var("DECKGEN_CONNECT_TIMEOUT_MS") {
            if let Ok(n) = val.parse() {
                self.service.connect_timeout_ms = n;
            }
        }

        // Polling settings
        if let Ok(val) = std::env::var("DECKGEN_POLL_INTERVAL_MS") {
            if let Ok(n) = val.parse() {
                self.polling.interval_ms = n;
            }
        }

        // Storage settings
        if let Ok(val) = std::env::var("DECKGEN_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) = std::env::var("DECKGEN_DOWNLOAD_DIR") {
            self.storage.download_dir = val;
        }

        // Logging settings
        if let Ok(val) = std::env::var("DECKGEN_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("DECKGEN_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("DECKGEN_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_dir = expand_path(&self.storage.data_dir);
        self.storage.download_dir = expand_path(&self.storage.download_dir);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        // Validate service URL
        if self.service.base_url.is_empty() {
            return Err(Error::config_field_invalid(
                "service.base_url",
                "Service URL cannot be empty",
            ));
        }
        match url::Url::parse(&self.service.base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => {
                return Err(Error::config_field_invalid(
                    "service.base_url",
                    format!("Unsupported URL scheme '{}'", parsed.scheme()),
                ));
            }
            Err(e) => {
                return Err(Error::config_field_invalid(
                    "service.base_url",
                    format!("Invalid service URL: {}", e),
                ));
            }
        }

        // Validate polling interval
        if self.polling.interval_ms < 100 {
            return Err(Error::config_field_invalid(
                "polling.interval_ms",
                "Polling interval must be at least 100ms",
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Get the data directory as a PathBuf
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Get the download directory as a PathBuf
    pub fn download_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.download_dir)
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<()> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".deckgen")
                .join("client.toml")
        });

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
    }

    // Generate default config with comments
    let config_content = generate_default_config();

    // Write the file
    fs::write(&config_path, config_content)
        .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

    println!("Configuration file created: {}", config_path.display());
    Ok(())
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# DeckGen Client Configuration
# https://github.com/deckgen/deckgen-client

[service]
# Base URL of the DeckGen API server
base_url = "http://localhost:8000"

# Connection timeout in milliseconds
connect_timeout_ms = 30000

[polling]
# Interval between job status requests in milliseconds
interval_ms = 2000

[storage]
# Base data directory (session credentials, tour marker)
data_dir = "~/.deckgen/client"

# Directory where generated decks are saved
download_dir = "."

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.deckgen/client/logs/client.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
