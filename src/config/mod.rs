//! Configuration module for Herald
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`HERALD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use herald::config::HeraldConfig;
//!
//! let config = HeraldConfig::default();
//! assert_eq!(config.server.port, 8080);
//!
//! let toml = r#"
//! [generation]
//! backends = ["gemini-2.0-flash"]
//! retry_delay_ms = 250
//! "#;
//! let config: HeraldConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.generation.backends.len(), 1);
//! assert_eq!(config.generation.retry_delay_ms, 250);
//! ```

pub mod error;
pub mod generation;
pub mod logging;
pub mod message;
pub mod server;

pub use error::ConfigError;
pub use generation::GenerationConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use message::MessageConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for Herald.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HeraldConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Backend cascade settings
    pub generation: GenerationConfig,
    /// Placeholder defaults
    pub message: MessageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl HeraldConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports HERALD_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Server settings
        if let Ok(port) = std::env::var("HERALD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("HERALD_HOST") {
            self.server.host = host;
        }

        // Logging settings
        if let Ok(level) = std::env::var("HERALD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HERALD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        // Generation settings
        if let Ok(backends) = std::env::var("HERALD_BACKENDS") {
            self.generation.backends = backends
                .split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(url) = std::env::var("HERALD_BASE_URL") {
            self.generation.base_url = url;
        }

        if let Ok(url) = std::env::var("HERALD_CTA_BASE_URL") {
            self.message.cta_base_url = url;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }

        let mut seen = HashSet::new();
        for (i, backend) in self.generation.backends.iter().enumerate() {
            let id = backend.trim();
            if id.is_empty() {
                return Err(ConfigError::invalid(
                    format!("generation.backends[{}]", i),
                    "backend identifier cannot be empty",
                ));
            }
            if !seen.insert(id) {
                return Err(ConfigError::invalid(
                    format!("generation.backends[{}]", i),
                    format!("duplicate backend identifier '{}'", id),
                ));
            }
        }

        if self.generation.base_url.is_empty() {
            return Err(ConfigError::invalid(
                "generation.base_url",
                "URL cannot be empty",
            ));
        }
        if self.generation.min_prompt_chars == 0 {
            return Err(ConfigError::invalid(
                "generation.min_prompt_chars",
                "must be at least 1",
            ));
        }
        if self.generation.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "generation.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        Ok(())
    }
}
