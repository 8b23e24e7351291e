//! Shared application state for all routes.

use crate::model::Clock;
use crate::repository::CatalogRepository;
use crate::schema::{build_schema, CatalogSchema};
use crate::service::CatalogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub schema: CatalogSchema,
    /// Used directly by the readiness check.
    pub repo: Arc<dyn CatalogRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn CatalogRepository>, clock: Arc<dyn Clock>) -> Self {
        let schema = build_schema(CatalogService::new(repo.clone()), clock);
        Self { schema, repo }
    }
}
