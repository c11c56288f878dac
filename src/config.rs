//! Configuration management for Promptkeep
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{PromptKeepError, Result};
use crate::storage::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Promptkeep
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Prompt collection and history archive locations
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage configuration
///
/// Passed to [`PromptStore::open`](crate::storage::PromptStore::open); the
/// store keeps no process-wide defaults of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root of the prompt collection
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: PathBuf,

    /// Root of the history archive
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,

    /// Behavior when two saves land on the same snapshot name
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

fn default_prompts_dir() -> PathBuf {
    PathBuf::from("./prompts")
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("./history")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prompts_dir: default_prompts_dir(),
            history_dir: default_history_dir(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl StorageConfig {
    /// Storage configuration rooted at the given directories
    ///
    /// # Examples
    ///
    /// ```
    /// use promptkeep::config::StorageConfig;
    ///
    /// let config = StorageConfig::new("/tmp/prompts", "/tmp/history");
    /// assert_eq!(config.prompts_dir.to_str(), Some("/tmp/prompts"));
    /// ```
    pub fn new(prompts_dir: impl Into<PathBuf>, history_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
            history_dir: history_dir.into(),
            collision_policy: CollisionPolicy::default(),
        }
    }

    /// Same configuration with a different collision policy
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PromptKeepError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| PromptKeepError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(prompts_dir) = std::env::var("PROMPTS_DIR") {
            self.storage.prompts_dir = PathBuf::from(prompts_dir);
        }

        if let Ok(history_dir) = std::env::var("HISTORY_DIR") {
            self.storage.history_dir = PathBuf::from(history_dir);
        }

        if let Ok(policy) = std::env::var("PROMPTKEEP_COLLISION_POLICY") {
            match policy.parse() {
                Ok(value) => self.storage.collision_policy = value,
                Err(e) => tracing::warn!("Invalid PROMPTKEEP_COLLISION_POLICY: {}", e),
            }
        }

        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(value) = port.parse() {
                self.server.port = value;
            } else {
                tracing::warn!("Invalid PORT: {}", port);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(prompts_dir) = &cli.prompts_dir {
            self.storage.prompts_dir = prompts_dir.clone();
        }

        if let Some(history_dir) = &cli.history_dir {
            self.storage.history_dir = history_dir.clone();
        }

        if let crate::cli::Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if a directory is empty, both directories are the same,
    /// the host is empty, or the port is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage.prompts_dir.as_os_str().is_empty() {
            return Err(
                PromptKeepError::Config("storage.prompts_dir cannot be empty".to_string()).into(),
            );
        }

        if self.storage.history_dir.as_os_str().is_empty() {
            return Err(
                PromptKeepError::Config("storage.history_dir cannot be empty".to_string()).into(),
            );
        }

        if self.storage.prompts_dir == self.storage.history_dir {
            return Err(PromptKeepError::Config(
                "storage.prompts_dir and storage.history_dir must differ".to_string(),
            )
            .into());
        }

        if self.server.host.is_empty() {
            return Err(PromptKeepError::Config("server.host cannot be empty".to_string()).into());
        }

        if self.server.port == 0 {
            return Err(
                PromptKeepError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        Ok(())
    }
}
