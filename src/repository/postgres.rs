//! PostgreSQL catalog store.

use super::{CatalogRepository, RepoError, RepoResult};
use crate::model::{
    Author, AuthorDraft, Book, BookDraft, BookFilter, Genre, PageRequest, Publisher, PublisherDraft,
};
use crate::sql::{self, PgBindValue, AUTHOR_COLUMNS, BOOK_COLUMNS, PUBLISHER_COLUMNS};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, sql: &str, params: &[PgBindValue]) -> RepoResult<Vec<PgRow>> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query(sql);
        for p in params {
            query = p.bind_to(query);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional(&self, sql: &str, params: &[PgBindValue]) -> RepoResult<Option<PgRow>> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query(sql);
        for p in params {
            query = p.bind_to(query);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn books(&self, sql: &str, params: &[PgBindValue]) -> RepoResult<Vec<Book>> {
        self.fetch_all(sql, params).await?.iter().map(book_from_row).collect()
    }
}

fn author_from_row(row: &PgRow) -> RepoResult<Author> {
    Ok(Author {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        birth_date: row.try_get("birth_date")?,
        biography: row.try_get("biography")?,
    })
}

fn publisher_from_row(row: &PgRow) -> RepoResult<Publisher> {
    Ok(Publisher {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        website: row.try_get("website")?,
    })
}

fn book_from_row(row: &PgRow) -> RepoResult<Book> {
    let genre: String = row.try_get("genre")?;
    let genre = genre.parse::<Genre>().map_err(RepoError::InvalidData)?;
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        isbn: row.try_get("isbn")?,
        price: row.try_get("price")?,
        published_date: row.try_get("published_date")?,
        genre,
        description: row.try_get("description")?,
        rating: row.try_get("rating")?,
        tags: row.try_get("tags")?,
        author_id: row.try_get("author_id")?,
        publisher_id: row.try_get("publisher_id")?,
    })
}

#[async_trait::async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_authors(&self, limit: u32) -> RepoResult<Vec<Author>> {
        let sql = format!("SELECT {} FROM authors a ORDER BY a.id LIMIT {}", AUTHOR_COLUMNS, limit);
        self.fetch_all(&sql, &[]).await?.iter().map(author_from_row).collect()
    }

    async fn author_by_id(&self, id: i64) -> RepoResult<Option<Author>> {
        let sql = format!("SELECT {} FROM authors a WHERE a.id = $1", AUTHOR_COLUMNS);
        self.fetch_optional(&sql, &[PgBindValue::I64(id)])
            .await?
            .as_ref()
            .map(author_from_row)
            .transpose()
    }

    async fn author_by_email(&self, email: &str) -> RepoResult<Option<Author>> {
        let sql = format!("SELECT {} FROM authors a WHERE a.email = $1", AUTHOR_COLUMNS);
        self.fetch_optional(&sql, &[PgBindValue::Text(email.to_string())])
            .await?
            .as_ref()
            .map(author_from_row)
            .transpose()
    }

    async fn insert_author(&self, draft: &AuthorDraft) -> RepoResult<Author> {
        let sql = "INSERT INTO authors (first_name, last_name, email, birth_date, biography) \
                   VALUES ($1, $2, $3, $4, $5) \
                   RETURNING id, first_name, last_name, email, birth_date, biography";
        tracing::debug!(sql = %sql, email = %draft.email, "query");
        let row = sqlx::query(sql)
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(&draft.email)
            .bind(draft.birth_date)
            .bind(&draft.biography)
            .fetch_one(&self.pool)
            .await?;
        author_from_row(&row)
    }

    async fn update_author(&self, id: i64, draft: &AuthorDraft) -> RepoResult<Option<Author>> {
        let sql = "UPDATE authors SET first_name = $1, last_name = $2, email = $3, \
                   birth_date = $4, biography = $5 WHERE id = $6 \
                   RETURNING id, first_name, last_name, email, birth_date, biography";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(sql)
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(&draft.email)
            .bind(draft.birth_date)
            .bind(&draft.biography)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(author_from_row).transpose()
    }

    async fn search_authors(&self, query: &str) -> RepoResult<Vec<Author>> {
        let q = sql::search_authors(query);
        self.fetch_all(&q.sql, &q.params).await?.iter().map(author_from_row).collect()
    }

    async fn list_publishers(&self) -> RepoResult<Vec<Publisher>> {
        let sql = format!("SELECT {} FROM publishers p ORDER BY p.id", PUBLISHER_COLUMNS);
        self.fetch_all(&sql, &[]).await?.iter().map(publisher_from_row).collect()
    }

    async fn publisher_by_id(&self, id: i64) -> RepoResult<Option<Publisher>> {
        let sql = format!("SELECT {} FROM publishers p WHERE p.id = $1", PUBLISHER_COLUMNS);
        self.fetch_optional(&sql, &[PgBindValue::I64(id)])
            .await?
            .as_ref()
            .map(publisher_from_row)
            .transpose()
    }

    async fn insert_publisher(&self, draft: &PublisherDraft) -> RepoResult<Publisher> {
        let sql = "INSERT INTO publishers (name, address, website) VALUES ($1, $2, $3) \
                   RETURNING id, name, address, website";
        tracing::debug!(sql = %sql, name = %draft.name, "query");
        let row = sqlx::query(sql)
            .bind(&draft.name)
            .bind(&draft.address)
            .bind(&draft.website)
            .fetch_one(&self.pool)
            .await?;
        publisher_from_row(&row)
    }

    async fn search_publishers(&self, query: &str) -> RepoResult<Vec<Publisher>> {
        let q = sql::search_publishers(query);
        self.fetch_all(&q.sql, &q.params).await?.iter().map(publisher_from_row).collect()
    }

    async fn count_books_by_publisher(&self, publisher_id: i64) -> RepoResult<i64> {
        let sql = "SELECT COUNT(*) FROM books WHERE publisher_id = $1";
        tracing::debug!(sql = %sql, publisher_id, "query");
        let count: i64 = sqlx::query_scalar(sql)
            .bind(publisher_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn books_by_publisher(&self, publisher_id: i64) -> RepoResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM books b WHERE b.publisher_id = $1 ORDER BY b.id", BOOK_COLUMNS);
        self.books(&sql, &[PgBindValue::I64(publisher_id)]).await
    }

    async fn list_books(&self, filter: &BookFilter, page: Option<PageRequest>) -> RepoResult<Vec<Book>> {
        let q = sql::select_books(filter, page);
        self.books(&q.sql, &q.params).await
    }

    async fn book_by_id(&self, id: i64) -> RepoResult<Option<Book>> {
        let sql = format!("SELECT {} FROM books b WHERE b.id = $1", BOOK_COLUMNS);
        self.fetch_optional(&sql, &[PgBindValue::I64(id)])
            .await?
            .as_ref()
            .map(book_from_row)
            .transpose()
    }

    async fn books_by_author(&self, author_id: i64) -> RepoResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM books b WHERE b.author_id = $1 ORDER BY b.id", BOOK_COLUMNS);
        self.books(&sql, &[PgBindValue::I64(author_id)]).await
    }

    async fn book_exists(&self, id: i64) -> RepoResult<bool> {
        let sql = "SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        let exists: bool = sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn insert_book(&self, draft: &BookDraft) -> RepoResult<Book> {
        let sql = "INSERT INTO books (title, isbn, price, published_date, genre, description, \
                   rating, author_id, publisher_id) \
                   VALUES ($1, $2, $3, $4, $5, $6, $7::float8, $8, $9) RETURNING id";
        tracing::debug!(sql = %sql, isbn = %draft.isbn, tags = ?draft.tags, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let id: i64 = sqlx::query_scalar(sql)
            .bind(&draft.title)
            .bind(&draft.isbn)
            .bind(draft.price)
            .bind(draft.published_date)
            .bind(draft.genre.as_str())
            .bind(&draft.description)
            .bind(draft.rating)
            .bind(draft.author_id)
            .bind(draft.publisher_id)
            .fetch_one(&mut *tx)
            .await?;
        for tag in &draft.tags {
            sqlx::query("INSERT INTO book_tags (book_id, tag) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        self.book_by_id(id)
            .await?
            .ok_or_else(|| RepoError::InvalidData(format!("book {} vanished after insert", id)))
    }

    async fn update_book(&self, id: i64, draft: &BookDraft) -> RepoResult<Option<Book>> {
        let sql = "UPDATE books SET title = $1, isbn = $2, price = $3, published_date = $4, \
                   genre = $5, description = $6, rating = $7::float8, author_id = $8, \
                   publisher_id = $9 WHERE id = $10";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&draft.title)
            .bind(&draft.isbn)
            .bind(draft.price)
            .bind(draft.published_date)
            .bind(draft.genre.as_str())
            .bind(&draft.description)
            .bind(draft.rating)
            .bind(draft.author_id)
            .bind(draft.publisher_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.book_by_id(id).await
    }

    async fn delete_book(&self, id: i64) -> RepoResult<bool> {
        let sql = "DELETE FROM books WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_books(&self, query: &str) -> RepoResult<Vec<Book>> {
        let q = sql::search_books(query);
        self.books(&q.sql, &q.params).await
    }
}
