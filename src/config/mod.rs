use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::SecurityHeaders;

const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "calendar_db";
const DEFAULT_COLLECTION: &str = "events";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("Invalid HOST value '{0}'")]
    InvalidHost(String),

    #[error("Invalid MONGODB_TIMEOUT_SECS value '{0}'")]
    InvalidTimeout(String),

    #[error("Unknown EVENT_STORE backend '{0}', expected 'mongodb' or 'memory'")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub mongodb_url: String,
    pub database: String,
    pub collection: String,
    /// Server selection timeout, bounds how long a health ping can block.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub backend: StoreBackend,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let backend = match lookup("EVENT_STORE").as_deref() {
            None | Some("mongodb") => StoreBackend::Mongo,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let timeout_secs = match lookup("MONGODB_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            backend,
            store: StoreConfig {
                mongodb_url: lookup("MONGODB_URL")
                    .unwrap_or_else(|| DEFAULT_MONGODB_URL.to_string()),
                database: lookup("MONGODB_DATABASE")
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                collection: lookup("MONGODB_COLLECTION")
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                timeout_secs,
            },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
