//! Builds parameterized SELECTs for book listing and cross-entity search.

use crate::model::{BookFilter, PageRequest};
use crate::sql::params::PgBindValue;

/// Book columns, rating cast to float8 and tags folded into a text[].
pub const BOOK_COLUMNS: &str = "b.id, b.title, b.isbn, b.price, b.published_date, b.genre, \
     b.description, b.rating::float8 AS rating, b.author_id, b.publisher_id, \
     ARRAY(SELECT t.tag FROM book_tags t WHERE t.book_id = b.id ORDER BY t.tag)::text[] AS tags";

pub const AUTHOR_COLUMNS: &str = "a.id, a.first_name, a.last_name, a.email, a.birth_date, a.biography";

pub const PUBLISHER_COLUMNS: &str = "p.id, p.name, p.address, p.website";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> u32 {
        self.params.push(v);
        self.params.len() as u32
    }
}

/// Case-insensitive substring test on `column` against placeholder `$n`.
/// `strpos` keeps `%` and `_` in user input literal.
fn contains_ci(column: &str, n: u32) -> String {
    format!("strpos(lower({}), lower(${})) > 0", column, n)
}

/// SELECT books matching every set filter field, ORDER BY id, optionally one page.
pub fn select_books(filter: &BookFilter, page: Option<PageRequest>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();

    if let Some(title) = &filter.title {
        let n = q.push_param(PgBindValue::Text(title.clone()));
        where_parts.push(contains_ci("b.title", n));
    }
    if let Some(genre) = filter.genre {
        let n = q.push_param(PgBindValue::Text(genre.as_str().to_string()));
        where_parts.push(format!("b.genre = ${}", n));
    }
    if let Some(min) = filter.min_price {
        let n = q.push_param(PgBindValue::Decimal(min));
        where_parts.push(format!("b.price >= ${}", n));
    }
    if let Some(max) = filter.max_price {
        let n = q.push_param(PgBindValue::Decimal(max));
        where_parts.push(format!("b.price <= ${}", n));
    }
    if let Some(after) = filter.published_after {
        let n = q.push_param(PgBindValue::Timestamp(after));
        where_parts.push(format!("b.published_date >= ${}", n));
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let page_clause = page
        .map(|p| format!(" LIMIT {} OFFSET {}", p.size, p.row_offset()))
        .unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM books b{} ORDER BY b.id{}",
        BOOK_COLUMNS, where_clause, page_clause
    );
    q
}

/// Books whose title or author's first/last name contains the query.
pub fn search_books(query: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Text(query.to_string()));
    q.sql = format!(
        "SELECT {} FROM books b JOIN authors a ON a.id = b.author_id WHERE {} OR {} OR {} ORDER BY b.id",
        BOOK_COLUMNS,
        contains_ci("b.title", n),
        contains_ci("a.first_name", n),
        contains_ci("a.last_name", n)
    );
    q
}

/// Authors whose first name, last name or email contains the query.
pub fn search_authors(query: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Text(query.to_string()));
    q.sql = format!(
        "SELECT {} FROM authors a WHERE {} OR {} OR {} ORDER BY a.id",
        AUTHOR_COLUMNS,
        contains_ci("a.first_name", n),
        contains_ci("a.last_name", n),
        contains_ci("a.email", n)
    );
    q
}

/// Publishers whose name or address contains the query.
pub fn search_publishers(query: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Text(query.to_string()));
    q.sql = format!(
        "SELECT {} FROM publishers p WHERE {} OR {} ORDER BY p.id",
        PUBLISHER_COLUMNS,
        contains_ci("p.name", n),
        contains_ci("p.address", n)
    );
    q
}
