//! Library catalog backend: authors, publishers and books over GraphQL,
//! stored in PostgreSQL or in memory.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod scalar;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use fixtures::seed_if_empty;
pub use migration::apply_migrations;
pub use model::{Clock, FixedClock, SystemClock};
pub use repository::{CatalogRepository, InMemoryCatalogRepository, PgCatalogRepository};
pub use routes::{common_routes, graphql_routes};
pub use schema::{build_schema, CatalogSchema};
pub use service::CatalogService;
pub use state::AppState;
pub use store::{ensure_database_exists, open_repository};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Full HTTP surface with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(graphql_routes(state))
        .layer(TraceLayer::new_for_http())
}
