use crate::state::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Executes one GraphQL request. Field and coercion errors come back inside
/// the response body with status 200.
pub async fn graphql(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let operation = request.operation_name.clone();
    let response = state.schema.execute(request).await;
    if response.is_err() {
        tracing::debug!(operation = ?operation, errors = ?response.errors, "graphql request had errors");
    }
    Json(response)
}

pub async fn graphiql() -> impl IntoResponse {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .finish(),
    )
}
