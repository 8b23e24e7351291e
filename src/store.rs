//! Opens the configured catalog store: database creation, pool, DDL and fixtures.

use crate::config::{ServerConfig, StoreKind};
use crate::error::{AppError, ConfigError};
use crate::fixtures::seed_if_empty;
use crate::migration::apply_migrations;
use crate::repository::{CatalogRepository, InMemoryCatalogRepository, PgCatalogRepository};
use sqlx::postgres::PgPoolOptions;
use sqlx::ConnectOptions;
use std::str::FromStr;
use std::sync::Arc;

/// Builds the repository named by `config.store`, ready to serve.
pub async fn open_repository(config: &ServerConfig) -> Result<Arc<dyn CatalogRepository>, AppError> {
    let repo: Arc<dyn CatalogRepository> = match config.store {
        StoreKind::Memory => {
            tracing::info!("using in-memory catalog store");
            Arc::new(InMemoryCatalogRepository::new())
        }
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            apply_migrations(&pool, config.reset_schema).await?;
            tracing::info!(max_connections = config.max_connections, "connected to postgres");
            Arc::new(PgCatalogRepository::new(pool))
        }
    };
    if config.seed && seed_if_empty(repo.as_ref()).await? {
        tracing::info!("loaded fixture catalog");
    }
    Ok(repo)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|_| invalid_url(database_url))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn invalid_url(url: &str) -> AppError {
    AppError::Config(ConfigError::InvalidValue {
        key: crate::config::ENV_DATABASE_URL,
        value: url.to_string(),
    })
}

/// Splits `postgres://host/db?opts` into (`postgres://host/postgres`, `db`).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).ok_or_else(|| invalid_url(url))?;
    let path_start = match url[scheme_end..].find('/') {
        Some(i) => scheme_end + i + 1,
        None => return Ok((url.to_string(), String::new())),
    };
    let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}postgres", &url[..path_start]);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
