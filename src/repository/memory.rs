//! In-memory catalog store. Enforces the same unique and foreign-key rules as
//! the PostgreSQL schema so both backends fail the same way.

use super::{CatalogRepository, RepoError, RepoResult};
use crate::model::{
    contains_ignore_case, price_fits_column, Author, AuthorDraft, Book, BookDraft, BookFilter,
    PageRequest, Publisher, PublisherDraft,
};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct MemoryState {
    authors: BTreeMap<i64, Author>,
    publishers: BTreeMap<i64, Publisher>,
    books: BTreeMap<i64, Book>,
    last_author_id: i64,
    last_publisher_id: i64,
    last_book_id: i64,
}

impl MemoryState {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.authors
            .values()
            .any(|a| a.email == email && Some(a.id) != except)
    }

    fn isbn_taken(&self, isbn: &str, except: Option<i64>) -> bool {
        self.books
            .values()
            .any(|b| b.isbn == isbn && Some(b.id) != except)
    }

    fn check_book_columns(&self, draft: &BookDraft) -> RepoResult<()> {
        if !price_fits_column(draft.price) {
            return Err(RepoError::InvalidData(format!(
                "numeric field overflow: price {}",
                draft.price
            )));
        }
        Ok(())
    }

    fn check_book_references(&self, draft: &BookDraft) -> RepoResult<()> {
        if !self.authors.contains_key(&draft.author_id) {
            return Err(RepoError::ForeignKeyViolation("fk_book_author".into()));
        }
        if !self.publishers.contains_key(&draft.publisher_id) {
            return Err(RepoError::ForeignKeyViolation("fk_book_publisher".into()));
        }
        Ok(())
    }

    fn books_where(&self, pred: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.books.values().filter(|b| pred(b)).cloned().collect()
    }
}

/// Thread-safe in-process repository; ids start at 1 per record kind.
#[derive(Default)]
pub struct InMemoryCatalogRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().map_err(|_| RepoError::Poisoned)
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().map_err(|_| RepoError::Poisoned)
    }
}

#[async_trait::async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn ping(&self) -> RepoResult<()> {
        self.read().map(|_| ())
    }

    async fn list_authors(&self, limit: u32) -> RepoResult<Vec<Author>> {
        let state = self.read()?;
        Ok(state.authors.values().take(limit as usize).cloned().collect())
    }

    async fn author_by_id(&self, id: i64) -> RepoResult<Option<Author>> {
        Ok(self.read()?.authors.get(&id).cloned())
    }

    async fn author_by_email(&self, email: &str) -> RepoResult<Option<Author>> {
        Ok(self.read()?.authors.values().find(|a| a.email == email).cloned())
    }

    async fn insert_author(&self, draft: &AuthorDraft) -> RepoResult<Author> {
        let mut state = self.write()?;
        if state.email_taken(&draft.email, None) {
            return Err(RepoError::UniqueViolation("authors_email_key".into()));
        }
        state.last_author_id += 1;
        let author = draft.clone().into_author(state.last_author_id);
        state.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: i64, draft: &AuthorDraft) -> RepoResult<Option<Author>> {
        let mut state = self.write()?;
        if !state.authors.contains_key(&id) {
            return Ok(None);
        }
        if state.email_taken(&draft.email, Some(id)) {
            return Err(RepoError::UniqueViolation("authors_email_key".into()));
        }
        let author = draft.clone().into_author(id);
        state.authors.insert(id, author.clone());
        Ok(Some(author))
    }

    async fn search_authors(&self, query: &str) -> RepoResult<Vec<Author>> {
        let state = self.read()?;
        Ok(state
            .authors
            .values()
            .filter(|a| {
                contains_ignore_case(&a.first_name, query)
                    || contains_ignore_case(&a.last_name, query)
                    || contains_ignore_case(&a.email, query)
            })
            .cloned()
            .collect())
    }

    async fn list_publishers(&self) -> RepoResult<Vec<Publisher>> {
        Ok(self.read()?.publishers.values().cloned().collect())
    }

    async fn publisher_by_id(&self, id: i64) -> RepoResult<Option<Publisher>> {
        Ok(self.read()?.publishers.get(&id).cloned())
    }

    async fn insert_publisher(&self, draft: &PublisherDraft) -> RepoResult<Publisher> {
        let mut state = self.write()?;
        state.last_publisher_id += 1;
        let publisher = draft.clone().into_publisher(state.last_publisher_id);
        state.publishers.insert(publisher.id, publisher.clone());
        Ok(publisher)
    }

    async fn search_publishers(&self, query: &str) -> RepoResult<Vec<Publisher>> {
        let state = self.read()?;
        Ok(state
            .publishers
            .values()
            .filter(|p| contains_ignore_case(&p.name, query) || contains_ignore_case(&p.address, query))
            .cloned()
            .collect())
    }

    async fn count_books_by_publisher(&self, publisher_id: i64) -> RepoResult<i64> {
        let state = self.read()?;
        Ok(state.books.values().filter(|b| b.publisher_id == publisher_id).count() as i64)
    }

    async fn books_by_publisher(&self, publisher_id: i64) -> RepoResult<Vec<Book>> {
        Ok(self.read()?.books_where(|b| b.publisher_id == publisher_id))
    }

    async fn list_books(&self, filter: &BookFilter, page: Option<PageRequest>) -> RepoResult<Vec<Book>> {
        let state = self.read()?;
        let matching = state.books.values().filter(|b| filter.matches(b));
        let books = match page {
            Some(page) => matching
                .skip(page.row_offset() as usize)
                .take(page.size as usize)
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        Ok(books)
    }

    async fn book_by_id(&self, id: i64) -> RepoResult<Option<Book>> {
        Ok(self.read()?.books.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: i64) -> RepoResult<Vec<Book>> {
        Ok(self.read()?.books_where(|b| b.author_id == author_id))
    }

    async fn book_exists(&self, id: i64) -> RepoResult<bool> {
        Ok(self.read()?.books.contains_key(&id))
    }

    async fn insert_book(&self, draft: &BookDraft) -> RepoResult<Book> {
        let mut state = self.write()?;
        state.check_book_columns(draft)?;
        if state.isbn_taken(&draft.isbn, None) {
            return Err(RepoError::UniqueViolation("books_isbn_key".into()));
        }
        state.check_book_references(draft)?;
        state.last_book_id += 1;
        let mut book = draft.clone().into_book(state.last_book_id);
        book.tags.sort();
        book.tags.dedup();
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: i64, draft: &BookDraft) -> RepoResult<Option<Book>> {
        let mut state = self.write()?;
        let Some(tags) = state.books.get(&id).map(|b| b.tags.clone()) else {
            return Ok(None);
        };
        state.check_book_columns(draft)?;
        if state.isbn_taken(&draft.isbn, Some(id)) {
            return Err(RepoError::UniqueViolation("books_isbn_key".into()));
        }
        state.check_book_references(draft)?;
        let mut book = draft.clone().into_book(id);
        book.tags = tags;
        state.books.insert(id, book.clone());
        Ok(Some(book))
    }

    async fn delete_book(&self, id: i64) -> RepoResult<bool> {
        Ok(self.write()?.books.remove(&id).is_some())
    }

    async fn search_books(&self, query: &str) -> RepoResult<Vec<Book>> {
        let state = self.read()?;
        Ok(state.books_where(|b| {
            contains_ignore_case(&b.title, query)
                || state.authors.get(&b.author_id).is_some_and(|a| {
                    contains_ignore_case(&a.first_name, query) || contains_ignore_case(&a.last_name, query)
                })
        }))
    }
}
