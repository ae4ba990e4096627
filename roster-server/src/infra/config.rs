use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub const PORT_VAR: &str = "SERVER_PORT";
pub const HOST_VAR: &str = "SERVER_HOST";

/// Server configuration loaded from environment variables (and an optional
/// `.env` file).
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Facts about how the configuration was assembled, reported at startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub env_file_loaded: bool,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("invalid port number: {value}")]
    InvalidPort { value: String },

    #[error("invalid listen address {host}:{port}")]
    InvalidAddress { host: String, port: u16 },
}

/// Load a `.env` file from the working directory into the process
/// environment, returning whether one was found.
///
/// Variables already set in the environment are not overwritten.
pub fn load_env_file() -> bool {
    dotenvy::dotenv().is_ok()
}

impl Config {
    /// Build configuration from an arbitrary key lookup.
    ///
    /// `SERVER_PORT` defaults to 8080 and `SERVER_HOST` to `0.0.0.0` when
    /// unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match non_empty(PORT_VAR) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigLoadError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };
        let host = non_empty(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            metadata: ConfigMetadata::default(),
        })
    }

    /// Socket address the server should bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigLoadError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| ConfigLoadError::InvalidAddress {
                host: self.server.host.clone(),
                port: self.server.port,
            })
    }
}
