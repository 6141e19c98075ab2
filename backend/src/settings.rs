//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BACKEND_*` environment variables and an
//! optional config file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The pool must allow at least one connection.
    #[error("db_pool_max_size must be at least 1")]
    EmptyPool,
}

/// Settings controlling the HTTP listener and the catalogue backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BACKEND")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from("0.0.0.0:8080"))]
    pub bind_address: String,
    /// PostgreSQL connection string. Without it the in-memory catalogue is
    /// used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_max_size: u32,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_address
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddress {
                value: self.bind_address.clone(),
                source,
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, rejecting a pool that could never hand out a connection.
    pub fn pool_size(&self) -> Result<u32, SettingsError> {
        match self.db_pool_max_size {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}
