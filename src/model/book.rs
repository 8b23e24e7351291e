use crate::model::clock::whole_years_between;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept for prices (NUMERIC(10,2)).
pub const PRICE_SCALE: u32 = 2;

/// Integer digits a NUMERIC(10,2) price can hold.
pub const PRICE_INTEGER_DIGITS: u32 = 8;

/// Closed set of book genres. Stored as the SCREAMING_SNAKE_CASE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, async_graphql::Enum)]
pub enum Genre {
    Fiction,
    NonFiction,
    ScienceFiction,
    Mystery,
    Romance,
    Thriller,
    Biography,
    History,
    Technology,
    Science,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::ScienceFiction => "SCIENCE_FICTION",
            Genre::Mystery => "MYSTERY",
            Genre::Romance => "ROMANCE",
            Genre::Thriller => "THRILLER",
            Genre::Biography => "BIOGRAPHY",
            Genre::History => "HISTORY",
            Genre::Technology => "TECHNOLOGY",
            Genre::Science => "SCIENCE",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "FICTION" => Genre::Fiction,
            "NON_FICTION" => Genre::NonFiction,
            "SCIENCE_FICTION" => Genre::ScienceFiction,
            "MYSTERY" => Genre::Mystery,
            "ROMANCE" => Genre::Romance,
            "THRILLER" => Genre::Thriller,
            "BIOGRAPHY" => Genre::Biography,
            "HISTORY" => Genre::History,
            "TECHNOLOGY" => Genre::Technology,
            "SCIENCE" => Genre::Science,
            other => return Err(format!("unknown genre '{}'", other)),
        })
    }
}

/// Stored book row with its tags. Author and publisher are referenced by id
/// and resolved on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    /// Unique across all books.
    pub isbn: String,
    pub price: Decimal,
    pub published_date: NaiveDateTime,
    pub genre: Genre,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub tags: Vec<String>,
    pub author_id: i64,
    pub publisher_id: i64,
}

impl Book {
    /// Currency-prefixed price, e.g. `$19.99`.
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }

    pub fn age_in_years_at(&self, now: NaiveDateTime) -> i32 {
        whole_years_between(self.published_date, now)
    }
}

/// Column values for inserting or replacing a book.
/// `tags` are only written on insert; updates leave stored tags as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub isbn: String,
    pub price: Decimal,
    pub published_date: NaiveDateTime,
    pub genre: Genre,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub tags: Vec<String>,
    pub author_id: i64,
    pub publisher_id: i64,
}

impl BookDraft {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            isbn: self.isbn,
            price: self.price,
            published_date: self.published_date,
            genre: self.genre,
            description: self.description,
            rating: self.rating,
            tags: self.tags,
            author_id: self.author_id,
            publisher_id: self.publisher_id,
        }
    }
}

/// Rounds to the stored price scale and pins the scale, so `20` becomes `20.00`.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price;
    price.rescale(PRICE_SCALE);
    price
}

/// Whether the price, once normalized, fits the NUMERIC(10,2) column.
pub fn price_fits_column(price: Decimal) -> bool {
    normalize_price(price).abs() < Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS))
}
