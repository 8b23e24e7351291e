//! Catalog server: reads settings from the environment, opens the store and serves GraphQL.

use catalog_graphql::{app, open_repository, AppState, ServerConfig, SystemClock};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("catalog_graphql=info".parse()?))
        .init();

    let config = ServerConfig::from_env()?;
    let repo = open_repository(&config).await?;
    let state = AppState::new(repo, Arc::new(SystemClock));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
