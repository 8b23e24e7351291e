//! Sample catalog loaded on first boot.

use crate::model::{AuthorDraft, BookDraft, Genre, PublisherDraft};
use crate::repository::{CatalogRepository, RepoError, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

struct FixtureBook {
    title: &'static str,
    isbn: &'static str,
    price_cents: i64,
    published: (i32, u32, u32),
    genre: Genre,
    description: &'static str,
    rating: f64,
    /// 1-based position in `AUTHORS` / `PUBLISHERS`.
    author: usize,
    publisher: usize,
    tags: [&'static str; 3],
}

/// (first, last, email, birth date, biography)
const AUTHORS: &[(&str, &str, &str, (i32, u32, u32), &str)] = &[
    ("John", "Doe", "john.doe@example.com", (1970, 1, 1), "Bestselling fiction author"),
    ("Jane", "Smith", "jane.smith@example.com", (1975, 5, 15), "Science fiction specialist"),
    ("Robert", "Johnson", "robert.johnson@example.com", (1980, 12, 25), "Technology and programming expert"),
    ("Emily", "Brown", "emily.brown@example.com", (1985, 7, 30), "Mystery and thriller writer"),
];

const PUBLISHERS: &[(&str, &str, &str)] = &[
    ("TechBooks Publishing", "123 Tech Street, Silicon Valley, CA", "https://techbooks.com"),
    ("Fiction House", "456 Story Lane, New York, NY", "https://fictionhouse.com"),
    ("Academic Press", "789 University Ave, Boston, MA", "https://academicpress.com"),
    ("Digital Media Corp", "321 Innovation Blvd, Austin, TX", "https://digitalmedia.com"),
];

const BOOKS: &[FixtureBook] = &[
    FixtureBook {
        title: "Spring Boot Mastery",
        isbn: "978-1234567890",
        price_cents: 4999,
        published: (2023, 1, 15),
        genre: Genre::Technology,
        description: "Complete guide to Spring Boot development",
        rating: 4.5,
        author: 3,
        publisher: 1,
        tags: ["Java", "Spring", "Backend"],
    },
    FixtureBook {
        title: "The Future Chronicles",
        isbn: "978-1234567891",
        price_cents: 2499,
        published: (2023, 3, 20),
        genre: Genre::ScienceFiction,
        description: "A thrilling journey through space and time",
        rating: 4.2,
        author: 2,
        publisher: 2,
        tags: ["Space", "Future", "Adventure"],
    },
    FixtureBook {
        title: "Mystery at Midnight",
        isbn: "978-1234567892",
        price_cents: 1999,
        published: (2023, 6, 10),
        genre: Genre::Mystery,
        description: "A gripping mystery novel set in Victorian London",
        rating: 4.0,
        author: 4,
        publisher: 2,
        tags: ["Victorian", "Detective", "Classic"],
    },
    FixtureBook {
        title: "GraphQL in Action",
        isbn: "978-1234567893",
        price_cents: 5499,
        published: (2023, 9, 5),
        genre: Genre::Technology,
        description: "Learn GraphQL from basics to advanced",
        rating: 4.7,
        author: 3,
        publisher: 1,
        tags: ["GraphQL", "API", "Modern"],
    },
    FixtureBook {
        title: "Digital Revolution",
        isbn: "978-1234567894",
        price_cents: 2999,
        published: (2023, 11, 12),
        genre: Genre::NonFiction,
        description: "How technology is changing our world",
        rating: 4.3,
        author: 1,
        publisher: 4,
        tags: ["Technology", "Society", "Digital"],
    },
];

fn midnight((y, m, d): (i32, u32, u32)) -> RepoResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RepoError::InvalidData(format!("fixture date {}-{}-{}", y, m, d)))
}

fn fixture_id(ids: &[i64], pos: usize) -> RepoResult<i64> {
    pos.checked_sub(1)
        .and_then(|i| ids.get(i))
        .copied()
        .ok_or_else(|| RepoError::InvalidData(format!("fixture reference {}", pos)))
}

/// Inserts the sample catalog unless any author already exists.
/// Returns true when fixtures were written.
pub async fn seed_if_empty(repo: &dyn CatalogRepository) -> RepoResult<bool> {
    if !repo.list_authors(1).await?.is_empty() {
        return Ok(false);
    }

    let mut author_ids = Vec::with_capacity(AUTHORS.len());
    for (first, last, email, birth, bio) in AUTHORS {
        let author = repo
            .insert_author(&AuthorDraft {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                birth_date: Some(midnight(*birth)?),
                biography: Some(bio.to_string()),
            })
            .await?;
        author_ids.push(author.id);
    }

    let mut publisher_ids = Vec::with_capacity(PUBLISHERS.len());
    for (name, address, website) in PUBLISHERS {
        let publisher = repo
            .insert_publisher(&PublisherDraft {
                name: name.to_string(),
                address: address.to_string(),
                website: Some(website.to_string()),
            })
            .await?;
        publisher_ids.push(publisher.id);
    }

    for b in BOOKS {
        repo.insert_book(&BookDraft {
            title: b.title.to_string(),
            isbn: b.isbn.to_string(),
            price: Decimal::new(b.price_cents, 2),
            published_date: midnight(b.published)?,
            genre: b.genre,
            description: Some(b.description.to_string()),
            rating: Some(b.rating),
            tags: b.tags.iter().map(|t| t.to_string()).collect(),
            author_id: fixture_id(&author_ids, b.author)?,
            publisher_id: fixture_id(&publisher_ids, b.publisher)?,
        })
        .await?;
    }
    tracing::debug!(
        authors = AUTHORS.len(),
        publishers = PUBLISHERS.len(),
        books = BOOKS.len(),
        "fixtures inserted"
    );
    Ok(true)
}
