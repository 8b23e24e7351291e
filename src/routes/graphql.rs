use crate::handlers::{graphiql, graphql, GRAPHQL_PATH};
use crate::state::AppState;
use axum::{routing::get, Router};

/// POST /graphql executes; GET /graphql and GET /graphiql serve the IDE.
pub fn graphql_routes(state: AppState) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql))
        .route("/graphiql", get(graphiql))
        .with_state(state)
}
