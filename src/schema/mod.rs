//! GraphQL schema: query and mutation roots over `CatalogService`.

mod mutation;
mod objects;
mod payloads;
mod query;

pub use mutation::MutationRoot;
pub use payloads::{AuthorPayload, BookPayload, DeletePayload};
pub use query::QueryRoot;

use crate::model::Clock;
use crate::service::CatalogService;
use async_graphql::{EmptySubscription, Schema};
use std::sync::Arc;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// `clock` drives the computed age fields.
pub fn build_schema(service: CatalogService, clock: Arc<dyn Clock>) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .data(clock)
        .finish()
}
