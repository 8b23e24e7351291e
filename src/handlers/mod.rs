//! HTTP handlers for the GraphQL endpoint and the GraphiQL IDE.

pub mod graphql;
pub use graphql::*;
