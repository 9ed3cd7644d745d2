//! Transport configuration types.
//!
//! `MCP_TRANSPORT` selects the transport. Each transport reads its own
//! `MCP_TCP_*` or `MCP_HTTP_*` variables. Values that do not parse are
//! reported and replaced by the default rather than silently ignored.

use std::fmt;
#[cfg(any(feature = "tcp", feature = "http"))]
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "http")]
use crate::core::error::Error;
use crate::core::error::Result;

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3001;

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 3000;

/// Routes the HTTP transport serves besides the JSON-RPC endpoint.
#[cfg(feature = "http")]
const RESERVED_HTTP_ROUTES: [&str; 2] = ["/", "/health"];

/// Which transport to serve on, with its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// One client over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// rmcp sessions over line-delimited TCP, one per connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// Stateless JSON-RPC over HTTP POST plus asset serving.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub host: String,
    pub port: u16,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,

    /// Route of the JSON-RPC endpoint.
    pub rpc_path: String,

    /// Allow any origin, method and header.
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_TCP_PORT,
        }
    }
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("MCP_TCP_HOST").unwrap_or(defaults.host),
            port: env_or("MCP_TCP_PORT", defaults.port),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_HTTP_PORT,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port: env_or("MCP_HTTP_PORT", defaults.port),
            rpc_path: std::env::var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path),
            enable_cors: env_or::<Flag>("MCP_HTTP_CORS", Flag(defaults.enable_cors)).0,
        }
    }

    /// The JSON-RPC route must be absolute and must not shadow another route.
    fn validate(&self) -> Result<()> {
        let path = self.rpc_path.as_str();
        if !path.starts_with('/') {
            return Err(Error::config(format!(
                "MCP_HTTP_PATH must start with '/', got {:?}",
                path
            )));
        }
        if RESERVED_HTTP_ROUTES.contains(&path) || path.starts_with("/assets") {
            return Err(Error::config(format!(
                "MCP_HTTP_PATH {:?} collides with a built-in route",
                path
            )));
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            Self::Tcp(TcpConfig::default())
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

impl TransportConfig {
    /// Select and configure the transport from `MCP_TRANSPORT`.
    ///
    /// An unset variable selects the default. A name that is unknown or not
    /// compiled into this build is reported and also falls back to the default.
    pub fn from_env() -> Self {
        let requested = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match requested.as_str() {
            "" => Self::default(),
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig::from_env()),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            other => {
                let fallback = Self::default();
                warn!(
                    "MCP_TRANSPORT={:?} is not available in this build, using {}",
                    other,
                    fallback.name()
                );
                fallback
            }
        }
    }

    /// Short transport name.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "stdio",
            #[cfg(feature = "tcp")]
            Self::Tcp(_) => "tcp",
            #[cfg(feature = "http")]
            Self::Http(_) => "http",
        }
    }

    /// Reject settings the transport could not serve with.
    pub fn validate(&self) -> Result<()> {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => Ok(()),
            #[cfg(feature = "tcp")]
            Self::Tcp(_) => Ok(()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => cfg.validate(),
        }
    }
}

impl fmt::Display for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => f.write_str("STDIO (standard MCP mode)"),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => write!(f, "TCP on {}", cfg.address()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => write!(f, "HTTP on {}{}", cfg.address(), cfg.rpc_path),
        }
    }
}

/// Read and parse an env var, keeping `default` when unset or unparsable.
#[cfg(any(feature = "tcp", feature = "http"))]
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Boolean env flag accepting `true/false`, `1/0`, `yes/no` and `on/off`.
#[cfg(feature = "http")]
struct Flag(bool);

#[cfg(feature = "http")]
impl FromStr for Flag {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Flag(true)),
            "false" | "0" | "no" | "off" => Ok(Flag(false)),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        let config = TransportConfig::default();
        assert_eq!(config.name(), "stdio");
        assert_eq!(config.to_string(), "STDIO (standard MCP mode)");
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(
            TransportConfig::Http(config).to_string(),
            "HTTP on 127.0.0.1:3000/mcp"
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_path_must_not_shadow_routes() {
        for path in ["mcp", "/", "/health", "/assets/x"] {
            let config = TransportConfig::Http(HttpConfig {
                rpc_path: path.to_string(),
                ..HttpConfig::default()
            });
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{}", path);
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_cors_flag_parsing() {
        assert!(matches!("off".parse::<Flag>(), Ok(Flag(false))));
        assert!(matches!("YES".parse::<Flag>(), Ok(Flag(true))));
        assert!("maybe".parse::<Flag>().is_err());
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_defaults() {
        let config = TcpConfig::default();
        assert_eq!(config.address(), "127.0.0.1:3001");
        assert_eq!(TransportConfig::Tcp(config).name(), "tcp");
    }

    #[cfg(any(feature = "tcp", feature = "http"))]
    #[test]
    fn test_env_or_keeps_default_on_garbage() {
        let _lock = crate::core::config::ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TEST_PORT", "not-a-port");
        }
        assert_eq!(env_or("MCP_TEST_PORT", 3000u16), 3000);
        unsafe {
            std::env::set_var("MCP_TEST_PORT", " 4100 ");
        }
        assert_eq!(env_or("MCP_TEST_PORT", 3000u16), 4100);
        unsafe {
            std::env::remove_var("MCP_TEST_PORT");
        }
    }
}
