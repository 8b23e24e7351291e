//! GraphQL input objects accepted by queries and mutations.

use crate::model::book::Genre;
use crate::model::filter::BookFilter;
use crate::scalar::DateTime;
use async_graphql::{InputObject, ID};
use rust_decimal::Decimal;

#[derive(Debug, Clone, InputObject)]
pub struct AuthorInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: Option<DateTime>,
    pub biography: Option<String>,
}

/// Used by both create and update. On update, a missing `authorId` or
/// `publisherId` keeps the current relation.
#[derive(Debug, Clone, InputObject)]
pub struct BookInput {
    pub title: String,
    pub isbn: String,
    pub price: Decimal,
    pub published_date: DateTime,
    pub author_id: Option<ID>,
    pub publisher_id: Option<ID>,
    pub genre: Genre,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "BookFilter")]
pub struct BookFilterInput {
    pub title: Option<String>,
    pub genre: Option<Genre>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub published_after: Option<DateTime>,
}

impl From<BookFilterInput> for BookFilter {
    fn from(input: BookFilterInput) -> Self {
        BookFilter {
            title: input.title,
            genre: input.genre,
            min_price: input.min_price,
            max_price: input.max_price,
            published_after: input.published_after.map(DateTime::into_inner),
        }
    }
}
