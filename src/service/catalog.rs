//! Catalog use cases: reads, relation lookups and payload-shaped mutations.
//!
//! Reads return `AppError` for malformed ids or storage faults. Mutations never
//! fail at the GraphQL level; every outcome is a `Payload`.

use crate::error::AppError;
use crate::model::{
    normalize_price, Author, AuthorDraft, AuthorInput, Book, BookDraft, BookFilter, BookInput,
    PageRequest, Publisher, SearchResult,
};
use crate::repository::{CatalogRepository, RepoError};
use crate::response::{ErrorCode, FieldError, Payload};
use crate::service::validation::{parse_id, parse_id_field};
use crate::scalar::DateTime;
use async_graphql::ID;
use std::sync::Arc;

/// Outcome of a mutation step: `Err` carries an expected business failure.
type Step<T> = Result<T, FieldError>;

pub const DEFAULT_AUTHOR_LIMIT: i32 = 10;
pub const DEFAULT_BOOK_LIMIT: i32 = 10;

#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    // ---- reads ----

    /// First `limit` authors by id; empty when `limit` is not positive.
    pub async fn authors(&self, limit: i32) -> Result<Vec<Author>, AppError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        Ok(self.repo.list_authors(limit as u32).await?)
    }

    pub async fn author_by_id(&self, raw_id: &str) -> Result<Option<Author>, AppError> {
        let id = parse_id(raw_id)?;
        Ok(self.repo.author_by_id(id).await?)
    }

    pub async fn publishers(&self) -> Result<Vec<Publisher>, AppError> {
        Ok(self.repo.list_publishers().await?)
    }

    pub async fn publisher_by_id(&self, raw_id: &str) -> Result<Option<Publisher>, AppError> {
        let id = parse_id(raw_id)?;
        Ok(self.repo.publisher_by_id(id).await?)
    }

    /// One page of filtered books. See `PageRequest::from_limit_offset` for
    /// how `offset` maps to a page.
    pub async fn books(&self, limit: i32, offset: i32, filter: &BookFilter) -> Result<Vec<Book>, AppError> {
        let Some(page) = PageRequest::from_limit_offset(limit, offset) else {
            return Ok(Vec::new());
        };
        Ok(self.repo.list_books(filter, Some(page)).await?)
    }

    /// Every book, unfiltered and unpaged.
    pub async fn all_books(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.repo.list_books(&BookFilter::default(), None).await?)
    }

    pub async fn book_by_id(&self, raw_id: &str) -> Result<Option<Book>, AppError> {
        let id = parse_id(raw_id)?;
        Ok(self.repo.book_by_id(id).await?)
    }

    pub async fn books_by_author(&self, raw_author_id: &str) -> Result<Vec<Book>, AppError> {
        let id = parse_id(raw_author_id)?;
        Ok(self.repo.books_by_author(id).await?)
    }

    /// Matching books, then authors, then publishers. No ranking or dedup.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AppError> {
        let books = self.repo.search_books(query).await?;
        let authors = self.repo.search_authors(query).await?;
        let publishers = self.repo.search_publishers(query).await?;
        tracing::debug!(
            query,
            books = books.len(),
            authors = authors.len(),
            publishers = publishers.len(),
            "search"
        );
        Ok(books
            .into_iter()
            .map(SearchResult::Book)
            .chain(authors.into_iter().map(SearchResult::Author))
            .chain(publishers.into_iter().map(SearchResult::Publisher))
            .collect())
    }

    // ---- relations ----

    pub async fn author_of(&self, book: &Book) -> Result<Author, AppError> {
        self.repo
            .author_by_id(book.author_id)
            .await?
            .ok_or(AppError::MissingRelation {
                kind: "author",
                id: book.author_id,
                book_id: book.id,
            })
    }

    pub async fn publisher_of(&self, book: &Book) -> Result<Publisher, AppError> {
        self.repo
            .publisher_by_id(book.publisher_id)
            .await?
            .ok_or(AppError::MissingRelation {
                kind: "publisher",
                id: book.publisher_id,
                book_id: book.id,
            })
    }

    pub async fn books_of_author(&self, author_id: i64) -> Result<Vec<Book>, AppError> {
        Ok(self.repo.books_by_author(author_id).await?)
    }

    pub async fn books_of_publisher(&self, publisher_id: i64) -> Result<Vec<Book>, AppError> {
        Ok(self.repo.books_by_publisher(publisher_id).await?)
    }

    pub async fn book_count(&self, publisher_id: i64) -> Result<i64, AppError> {
        Ok(self.repo.count_books_by_publisher(publisher_id).await?)
    }

    // ---- mutations ----

    pub async fn create_author(&self, input: AuthorInput) -> Payload<Author> {
        let result = self.try_create_author(input).await;
        finish("createAuthor", ErrorCode::CreationError, result)
    }

    async fn try_create_author(&self, input: AuthorInput) -> Result<Step<Author>, RepoError> {
        if self.repo.author_by_email(&input.email).await?.is_some() {
            return Ok(Err(FieldError::new(
                "email",
                "Email already exists",
                ErrorCode::DuplicateEmail,
            )));
        }
        let author = self.repo.insert_author(&author_draft(input)).await?;
        Ok(Ok(author))
    }

    pub async fn update_author(&self, raw_id: &str, input: AuthorInput) -> Payload<Author> {
        let result = self.try_update_author(raw_id, input).await;
        finish("updateAuthor", ErrorCode::UpdateError, result)
    }

    async fn try_update_author(&self, raw_id: &str, input: AuthorInput) -> Result<Step<Author>, RepoError> {
        let id = match parse_id_field("id", raw_id) {
            Ok(id) => id,
            Err(detail) => return Ok(Err(detail)),
        };
        let updated = self.repo.update_author(id, &author_draft(input)).await?;
        Ok(updated.ok_or_else(author_not_found_by_id))
    }

    pub async fn create_book(&self, input: BookInput) -> Payload<Book> {
        let result = self.try_create_book(input).await;
        finish("createBook", ErrorCode::CreationError, result)
    }

    async fn try_create_book(&self, input: BookInput) -> Result<Step<Book>, RepoError> {
        let author_id = match self.resolve_author(input.author_id.as_ref()).await? {
            Ok(Some(id)) => id,
            Ok(None) => return Ok(Err(author_not_found())),
            Err(detail) => return Ok(Err(detail)),
        };
        let publisher_id = match self.resolve_publisher(input.publisher_id.as_ref()).await? {
            Ok(Some(id)) => id,
            Ok(None) => return Ok(Err(publisher_not_found())),
            Err(detail) => return Ok(Err(detail)),
        };
        let draft = book_draft(input, author_id, publisher_id, None, Vec::new());
        Ok(Ok(self.repo.insert_book(&draft).await?))
    }

    pub async fn update_book(&self, raw_id: &str, input: BookInput) -> Payload<Book> {
        let result = self.try_update_book(raw_id, input).await;
        finish("updateBook", ErrorCode::UpdateError, result)
    }

    /// Author and publisher change only when the given id parses and resolves;
    /// otherwise the stored relation is kept.
    async fn try_update_book(&self, raw_id: &str, input: BookInput) -> Result<Step<Book>, RepoError> {
        let id = match parse_id_field("id", raw_id) {
            Ok(id) => id,
            Err(detail) => return Ok(Err(detail)),
        };
        let Some(current) = self.repo.book_by_id(id).await? else {
            return Ok(Err(book_not_found()));
        };
        let author_id = match self.resolve_author(input.author_id.as_ref()).await? {
            Ok(Some(resolved)) => resolved,
            _ => current.author_id,
        };
        let publisher_id = match self.resolve_publisher(input.publisher_id.as_ref()).await? {
            Ok(Some(resolved)) => resolved,
            _ => current.publisher_id,
        };
        let draft = book_draft(input, author_id, publisher_id, current.rating, current.tags);
        let updated = self.repo.update_book(id, &draft).await?;
        Ok(updated.ok_or_else(book_not_found))
    }

    /// On success the payload carries the id exactly as given.
    pub async fn delete_book(&self, raw_id: &str) -> Payload<String> {
        let result = self.try_delete_book(raw_id).await;
        finish("deleteBook", ErrorCode::DeleteError, result)
    }

    async fn try_delete_book(&self, raw_id: &str) -> Result<Step<String>, RepoError> {
        let id = match parse_id_field("id", raw_id) {
            Ok(id) => id,
            Err(detail) => return Ok(Err(detail)),
        };
        if !self.repo.book_exists(id).await? || !self.repo.delete_book(id).await? {
            return Ok(Err(book_not_found()));
        }
        Ok(Ok(raw_id.to_string()))
    }

    /// `create_book` per element in order. Earlier successes stay when a later one fails.
    pub async fn create_books(&self, inputs: Vec<BookInput>) -> Vec<Payload<Book>> {
        let mut out = Vec::with_capacity(inputs.len());
        for input in inputs {
            out.push(self.create_book(input).await);
        }
        out
    }

    /// `Ok(None)` when the id is absent or unknown; `Err` when it is malformed.
    async fn resolve_author(&self, raw: Option<&ID>) -> Result<Step<Option<i64>>, RepoError> {
        let Some(raw) = raw else {
            return Ok(Ok(None));
        };
        let id = match parse_id_field("authorId", raw.as_str()) {
            Ok(id) => id,
            Err(detail) => return Ok(Err(detail)),
        };
        Ok(Ok(self.repo.author_by_id(id).await?.map(|a| a.id)))
    }

    async fn resolve_publisher(&self, raw: Option<&ID>) -> Result<Step<Option<i64>>, RepoError> {
        let Some(raw) = raw else {
            return Ok(Ok(None));
        };
        let id = match parse_id_field("publisherId", raw.as_str()) {
            Ok(id) => id,
            Err(detail) => return Ok(Err(detail)),
        };
        Ok(Ok(self.repo.publisher_by_id(id).await?.map(|p| p.id)))
    }
}

/// Folds a mutation result into a payload, logging the outcome. Storage errors
/// become a `general` error with `fallback`.
fn finish<T>(op: &'static str, fallback: ErrorCode, result: Result<Step<T>, RepoError>) -> Payload<T> {
    match result {
        Ok(Ok(entity)) => {
            tracing::info!(op, "mutation succeeded");
            Payload::Ok(entity)
        }
        Ok(Err(detail)) => {
            tracing::warn!(op, field = %detail.field, code = detail.code.as_str(), "mutation rejected");
            Payload::failed(detail)
        }
        Err(e) => {
            tracing::warn!(op, error = %e, "mutation failed");
            Payload::failed(FieldError::general(fallback, e.to_string()))
        }
    }
}

fn author_not_found() -> FieldError {
    FieldError::new("authorId", "Author not found", ErrorCode::AuthorNotFound)
}

fn author_not_found_by_id() -> FieldError {
    FieldError::new("id", "Author not found", ErrorCode::AuthorNotFound)
}

fn publisher_not_found() -> FieldError {
    FieldError::new("publisherId", "Publisher not found", ErrorCode::PublisherNotFound)
}

fn book_not_found() -> FieldError {
    FieldError::new("id", "Book not found", ErrorCode::BookNotFound)
}

fn author_draft(input: AuthorInput) -> AuthorDraft {
    AuthorDraft {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        birth_date: input.birth_date.map(DateTime::into_inner),
        biography: input.biography,
    }
}

fn book_draft(
    input: BookInput,
    author_id: i64,
    publisher_id: i64,
    rating: Option<f64>,
    tags: Vec<String>,
) -> BookDraft {
    BookDraft {
        title: input.title,
        isbn: input.isbn,
        price: normalize_price(input.price),
        published_date: input.published_date.into_inner(),
        genre: input.genre,
        description: input.description,
        rating,
        tags,
        author_id,
        publisher_id,
    }
}
