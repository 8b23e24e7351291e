//! Server settings read from the environment (after `.env` is loaded).

pub mod loader;
pub mod validator;

pub use loader::*;
pub use validator::*;

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

/// Which repository backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_STORE,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub store: StoreKind,
    /// Load fixtures when the catalog is empty.
    pub seed: bool,
    /// Drop and recreate the catalog tables on startup.
    pub reset_schema: bool,
}
