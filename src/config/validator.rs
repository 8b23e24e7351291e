//! Cross-field checks on a parsed `ServerConfig`.

use crate::config::{ServerConfig, StoreKind};
use crate::error::ConfigError;

pub fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.max_connections == 0 {
        return Err(ConfigError::Validation(
            "CATALOG_MAX_CONNECTIONS must be at least 1".into(),
        ));
    }
    if config.store == StoreKind::Postgres {
        let url = config.database_url.as_str();
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConfigError::Validation(format!(
                "DATABASE_URL must be a postgres:// url, got '{}'",
                url
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(store: StoreKind, url: &str) -> ServerConfig {
        ServerConfig {
            database_url: url.into(),
            bind_addr: ([127, 0, 0, 1], 8080).into(),
            max_connections: 1,
            store,
            seed: true,
            reset_schema: false,
        }
    }

    #[test]
    fn postgres_store_needs_postgres_url() {
        assert!(validate(&config(StoreKind::Postgres, "postgresql://h/db")).is_ok());
        assert!(validate(&config(StoreKind::Postgres, "mysql://h/db")).is_err());
        assert!(validate(&config(StoreKind::Memory, "mysql://h/db")).is_ok());
    }
}
