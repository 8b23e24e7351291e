//! Output types for catalog records, with computed and relation fields.

use crate::error::AppError;
use crate::model::{Author, Book, Clock, Genre, Publisher};
use crate::response::FieldError;
use crate::scalar::DateTime;
use crate::service::CatalogService;
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use rust_decimal::Decimal;
use std::sync::Arc;

pub(crate) fn service<'a>(ctx: &Context<'a>) -> Result<&'a CatalogService> {
    ctx.data::<CatalogService>()
}

fn clock<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn Clock>> {
    ctx.data::<Arc<dyn Clock>>()
}

pub(crate) fn gql(e: AppError) -> async_graphql::Error {
    e.extend()
}

#[Object]
impl Author {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn first_name(&self) -> &str {
        &self.first_name
    }

    async fn last_name(&self) -> &str {
        &self.last_name
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn birth_date(&self) -> Option<DateTime> {
        self.birth_date.map(DateTime)
    }

    async fn biography(&self) -> Option<&str> {
        self.biography.as_deref()
    }

    #[graphql(name = "fullName")]
    async fn resolve_full_name(&self) -> String {
        self.full_name()
    }

    #[graphql(deprecation = "Use fullName")]
    async fn name(&self) -> String {
        self.full_name()
    }

    /// Whole years since birth; null without a birth date.
    async fn age(&self, ctx: &Context<'_>) -> Result<Option<i32>> {
        Ok(self.age_at(clock(ctx)?.now()))
    }

    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        service(ctx)?.books_of_author(self.id).await.map_err(gql)
    }
}

#[Object]
impl Publisher {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn address(&self) -> &str {
        &self.address
    }

    async fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    async fn book_count(&self, ctx: &Context<'_>) -> Result<i64> {
        service(ctx)?.book_count(self.id).await.map_err(gql)
    }

    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        service(ctx)?.books_of_publisher(self.id).await.map_err(gql)
    }
}

#[Object]
impl Book {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn isbn(&self) -> &str {
        &self.isbn
    }

    async fn price(&self) -> Decimal {
        self.price
    }

    async fn published_date(&self) -> DateTime {
        DateTime(self.published_date)
    }

    async fn genre(&self) -> Genre {
        self.genre
    }

    async fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    async fn rating(&self) -> Option<f64> {
        self.rating
    }

    async fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        service(ctx)?.author_of(self).await.map_err(gql)
    }

    async fn publisher(&self, ctx: &Context<'_>) -> Result<Publisher> {
        service(ctx)?.publisher_of(self).await.map_err(gql)
    }

    #[graphql(name = "displayPrice")]
    async fn resolve_display_price(&self) -> String {
        self.display_price()
    }

    async fn age_in_years(&self, ctx: &Context<'_>) -> Result<i32> {
        Ok(self.age_in_years_at(clock(ctx)?.now()))
    }
}

#[Object(name = "ErrorDetail")]
impl FieldError {
    async fn field(&self) -> &str {
        &self.field
    }

    async fn message(&self) -> &str {
        &self.message
    }

    async fn code(&self) -> &str {
        self.code.as_str()
    }
}
