//! Catalog DDL. Every statement is idempotent so startup can always run it.

use crate::error::AppError;
use sqlx::PgPool;

const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS book_tags",
    "DROP TABLE IF EXISTS books",
    "DROP TABLE IF EXISTS publishers",
    "DROP TABLE IF EXISTS authors",
];

/// Tables in dependency order: books reference authors and publishers, tags reference books.
const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id BIGSERIAL PRIMARY KEY,
        first_name VARCHAR(255) NOT NULL,
        last_name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        birth_date TIMESTAMP,
        biography TEXT,
        CONSTRAINT authors_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS publishers (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        address VARCHAR(255) NOT NULL,
        website VARCHAR(255)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        isbn VARCHAR(32) NOT NULL,
        price NUMERIC(10, 2) NOT NULL,
        published_date TIMESTAMP NOT NULL,
        genre VARCHAR(32) NOT NULL,
        description TEXT,
        rating NUMERIC(3, 2),
        author_id BIGINT NOT NULL,
        publisher_id BIGINT NOT NULL,
        CONSTRAINT books_isbn_key UNIQUE (isbn),
        CONSTRAINT fk_book_author FOREIGN KEY (author_id) REFERENCES authors (id),
        CONSTRAINT fk_book_publisher FOREIGN KEY (publisher_id) REFERENCES publishers (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book_tags (
        book_id BIGINT NOT NULL REFERENCES books (id) ON DELETE CASCADE,
        tag VARCHAR(255) NOT NULL,
        PRIMARY KEY (book_id, tag)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books (author_id)",
    "CREATE INDEX IF NOT EXISTS idx_books_publisher_id ON books (publisher_id)",
];

/// Creates the catalog tables if missing. With `reset`, drops them first so
/// the store starts empty.
pub async fn apply_migrations(pool: &PgPool, reset: bool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    if reset {
        tracing::warn!("dropping catalog tables");
        for sql in DROP_TABLES {
            sqlx::query(sql).execute(&mut *tx).await?;
        }
    }
    for sql in CREATE_TABLES {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(reset, "catalog schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_run_children_first() {
        let pos = |t: &str| DROP_TABLES.iter().position(|s| s.ends_with(t)).unwrap();
        assert!(pos("book_tags") < pos("books"));
        assert!(pos("books") < pos("authors"));
        assert!(pos("books") < pos("publishers"));
    }

    #[test]
    fn constraint_names_match_error_mapping() {
        let ddl = CREATE_TABLES.join("\n");
        for name in ["authors_email_key", "books_isbn_key", "fk_book_author", "fk_book_publisher"] {
            assert!(ddl.contains(name), "missing constraint {}", name);
        }
        assert!(CREATE_TABLES.iter().all(|s| s.contains("IF NOT EXISTS")));
    }
}
