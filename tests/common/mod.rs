#![allow(dead_code)]

use async_graphql::Response;
use catalog_graphql::{
    build_schema, seed_if_empty, AppState, CatalogSchema, CatalogService, FixedClock,
    InMemoryCatalogRepository,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::sync::Arc;

/// 2025-06-01T00:00:00, the "now" for every computed age in these tests.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub async fn seeded_repo() -> Arc<InMemoryCatalogRepository> {
    let repo = Arc::new(InMemoryCatalogRepository::new());
    assert!(seed_if_empty(repo.as_ref()).await.unwrap());
    repo
}

pub async fn seeded_schema() -> CatalogSchema {
    let repo = seeded_repo().await;
    build_schema(CatalogService::new(repo), Arc::new(FixedClock(fixed_now())))
}

pub async fn seeded_state() -> AppState {
    let repo = seeded_repo().await;
    AppState::new(repo, Arc::new(FixedClock(fixed_now())))
}

/// Executes and returns `data`, failing the test on any GraphQL error.
pub async fn run(schema: &CatalogSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

/// Executes and returns the whole response as JSON, errors included.
pub async fn run_raw(schema: &CatalogSchema, query: &str) -> Value {
    let response: Response = schema.execute(query).await;
    serde_json::to_value(&response).unwrap()
}

/// Ids of a list of objects, as strings.
pub fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

pub fn book_input(title: &str, isbn: &str, price: &str, author_id: &str, publisher_id: &str) -> String {
    format!(
        r#"{{ title: "{}", isbn: "{}", price: "{}", publishedDate: "2024-02-01T00:00:00", genre: MYSTERY, authorId: "{}", publisherId: "{}" }}"#,
        title, isbn, price, author_id, publisher_id
    )
}
