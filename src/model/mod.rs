//! Catalog records, drafts for writes, query inputs and the clock used by
//! computed fields.

pub mod author;
pub mod book;
pub mod clock;
pub mod filter;
pub mod input;
pub mod publisher;

pub use author::{Author, AuthorDraft};
pub use book::{normalize_price, price_fits_column, Book, BookDraft, Genre};
pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{BookFilter, PageRequest};
pub use input::{AuthorInput, BookFilterInput, BookInput};
pub use publisher::{Publisher, PublisherDraft};

/// One hit of a cross-entity search.
#[derive(Debug, Clone, async_graphql::Union)]
pub enum SearchResult {
    Book(Book),
    Author(Author),
    Publisher(Publisher),
}

/// Case-insensitive substring test used by filters and search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
