mod common;
mod graphql;

pub use common::common_routes;
pub use graphql::graphql_routes;
