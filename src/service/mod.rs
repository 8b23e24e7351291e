//! Catalog service: validation and payload shaping on top of the repository.

mod catalog;
mod validation;
pub use catalog::{CatalogService, DEFAULT_AUTHOR_LIMIT, DEFAULT_BOOK_LIMIT};
pub use validation::{parse_id, parse_id_field};
