//! Configuration management for the MCP server.
//!
//! Values come from defaults, then from environment variables (a `.env`
//! file is loaded first when present).

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Serialises tests that touch process environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Where widget templates and scripts are read from.
    pub assets: AssetsConfig,

    /// Restrictions on files that tools may read.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Asset store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding widget HTML and JavaScript files.
    pub dir: PathBuf,
}

/// Configuration for file access by tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Optional root directory. When set, tools may only read files below it.
    pub root_path: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "stock-tools-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            assets: AssetsConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `MCP_`, for example
    /// `MCP_SERVER_NAME` or `MCP_ASSETS_DIR`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(dir) = std::env::var("MCP_ASSETS_DIR") {
            config.assets.dir = PathBuf::from(dir);
            info!("Assets directory set to {:?}", config.assets.dir);
        }

        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!(
                "Path security enabled: root directory set to {:?}",
                config.security.root_path
            );
        } else {
            warn!("MCP_ROOT_PATH not set - analyze_csv may read any readable file");
        }

        config
    }

    /// Check settings that would otherwise only fail once a client calls in.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }

        self.transport.validate()?;

        if !self.assets.dir.is_dir() {
            warn!(
                "Assets directory {:?} does not exist; widget tools will fail",
                self.assets.dir
            );
        }

        if let Some(root) = &self.security.root_path {
            if !root.is_dir() {
                return Err(Error::config(format!(
                    "MCP_ROOT_PATH {} is not a directory",
                    root.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "stock-tools-mcp");
        assert_eq!(config.logging.level, "info");
        assert!(config.assets.dir.ends_with("assets"));
        assert!(config.security.root_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_assets_dir_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_ASSETS_DIR", "/tmp/widgets");
        }
        let config = Config::from_env();
        assert_eq!(config.assets.dir, PathBuf::from("/tmp/widgets"));
        unsafe {
            std::env::remove_var("MCP_ASSETS_DIR");
        }
    }

    #[test]
    fn test_root_path_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        unsafe {
            std::env::set_var("MCP_ROOT_PATH", temp_dir.path());
        }
        let config = Config::from_env();
        assert_eq!(config.security.root_path.as_deref(), Some(temp_dir.path()));
        assert!(config.validate().is_ok());
        unsafe {
            std::env::remove_var("MCP_ROOT_PATH");
        }
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let mut config = Config::default();
        config.security.root_path = Some(PathBuf::from("/nonexistent/root/dir"));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut config = Config::default();
        config.server.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_validate_checks_http_path() {
        use crate::core::transport::HttpConfig;

        let mut config = Config::default();
        config.transport = TransportConfig::Http(HttpConfig {
            rpc_path: "/health".to_string(),
            ..HttpConfig::default()
        });
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_transport_falls_back_to_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "carrier-pigeon");
        }
        let config = Config::from_env();
        assert_eq!(config.transport.name(), TransportConfig::default().name());
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
    }
}
