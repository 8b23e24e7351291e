//! Reads `ServerConfig` from environment variables.

use crate::config::{validate, ServerConfig, StoreKind};
use crate::error::ConfigError;
use std::str::FromStr;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND_ADDR: &str = "CATALOG_BIND_ADDR";
pub const ENV_MAX_CONNECTIONS: &str = "CATALOG_MAX_CONNECTIONS";
pub const ENV_STORE: &str = "CATALOG_STORE";
pub const ENV_SEED: &str = "CATALOG_SEED";
pub const ENV_RESET_SCHEMA: &str = "CATALOG_RESET_SCHEMA";

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/catalog";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: ENV_BIND_ADDR,
            value: bind_raw.clone(),
        })?;

        let max_connections = match get(ENV_MAX_CONNECTIONS) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_MAX_CONNECTIONS,
                value: raw,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let store = match get(ENV_STORE) {
            Some(raw) => StoreKind::from_str(&raw)?,
            None => StoreKind::Postgres,
        };

        let config = ServerConfig {
            database_url: get(ENV_DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr,
            max_connections,
            store,
            seed: parse_bool(ENV_SEED, get(ENV_SEED), true)?,
            reset_schema: parse_bool(ENV_RESET_SCHEMA, get(ENV_RESET_SCHEMA), false)?,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}
