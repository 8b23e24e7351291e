//! Persistence contract for the catalog and its two backends.
//!
//! Lookups by id return `Ok(None)` for a missing row; only storage faults and
//! constraint violations are errors.

mod memory;
mod postgres;

pub use memory::InMemoryCatalogRepository;
pub use postgres::PgCatalogRepository;

use crate::model::{Author, AuthorDraft, Book, BookDraft, BookFilter, PageRequest, Publisher, PublisherDraft};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("duplicate key value violates unique constraint \"{0}\"")]
    UniqueViolation(String),
    #[error("insert or update violates foreign key constraint \"{0}\"")]
    ForeignKeyViolation(String),
    #[error("invalid stored data: {0}")]
    InvalidData(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or("unknown").to_string();
            if db.is_unique_violation() {
                return RepoError::UniqueViolation(constraint);
            }
            if db.is_foreign_key_violation() {
                return RepoError::ForeignKeyViolation(constraint);
            }
        }
        RepoError::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// All list operations return rows ordered by id.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Cheap liveness check of the backing store.
    async fn ping(&self) -> RepoResult<()>;

    async fn list_authors(&self, limit: u32) -> RepoResult<Vec<Author>>;
    async fn author_by_id(&self, id: i64) -> RepoResult<Option<Author>>;
    /// Exact match on the unique email.
    async fn author_by_email(&self, email: &str) -> RepoResult<Option<Author>>;
    async fn insert_author(&self, draft: &AuthorDraft) -> RepoResult<Author>;
    /// Replaces every column; None if the id is unknown.
    async fn update_author(&self, id: i64, draft: &AuthorDraft) -> RepoResult<Option<Author>>;
    /// First name, last name or email contains `query`, ignoring case.
    async fn search_authors(&self, query: &str) -> RepoResult<Vec<Author>>;

    async fn list_publishers(&self) -> RepoResult<Vec<Publisher>>;
    async fn publisher_by_id(&self, id: i64) -> RepoResult<Option<Publisher>>;
    async fn insert_publisher(&self, draft: &PublisherDraft) -> RepoResult<Publisher>;
    /// Name or address contains `query`, ignoring case.
    async fn search_publishers(&self, query: &str) -> RepoResult<Vec<Publisher>>;
    async fn count_books_by_publisher(&self, publisher_id: i64) -> RepoResult<i64>;
    async fn books_by_publisher(&self, publisher_id: i64) -> RepoResult<Vec<Book>>;

    /// Filtered listing; `page` None means unbounded.
    async fn list_books(&self, filter: &BookFilter, page: Option<PageRequest>) -> RepoResult<Vec<Book>>;
    async fn book_by_id(&self, id: i64) -> RepoResult<Option<Book>>;
    async fn books_by_author(&self, author_id: i64) -> RepoResult<Vec<Book>>;
    async fn book_exists(&self, id: i64) -> RepoResult<bool>;
    /// Inserts the book and its tags. Author and publisher must exist.
    async fn insert_book(&self, draft: &BookDraft) -> RepoResult<Book>;
    /// Replaces every column except tags, which stay as stored.
    async fn update_book(&self, id: i64, draft: &BookDraft) -> RepoResult<Option<Book>>;
    /// True if a row was deleted. Tags go with the book.
    async fn delete_book(&self, id: i64) -> RepoResult<bool>;
    /// Title, author first name or author last name contains `query`, ignoring case.
    async fn search_books(&self, query: &str) -> RepoResult<Vec<Book>>;
}
