//! Book listing filter and page-based pagination.

use crate::model::book::{Book, Genre};
use crate::model::contains_ignore_case;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Conjunction of optional predicates; an unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub genre: Option<Genre>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Inclusive lower bound on the published date.
    pub published_after: Option<NaiveDateTime>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        self.title
            .as_deref()
            .map_or(true, |t| contains_ignore_case(&book.title, t))
            && self.genre.map_or(true, |g| book.genre == g)
            && self.min_price.map_or(true, |min| book.price >= min)
            && self.max_price.map_or(true, |max| book.price <= max)
            && self
                .published_after
                .map_or(true, |after| book.published_date >= after)
    }
}

/// Zero-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Converts limit/offset arguments to a page: index `offset / limit`,
    /// size `limit`. An offset that is not a multiple of the limit is
    /// truncated to the start of its page, so `limit=10, offset=5` is page 0.
    /// Returns None when `limit` is not positive; negative offsets count as 0.
    pub fn from_limit_offset(limit: i32, offset: i32) -> Option<Self> {
        if limit <= 0 {
            return None;
        }
        let size = limit as u32;
        let offset = offset.max(0) as u32;
        Some(PageRequest {
            page: offset / size,
            size,
        })
    }

    /// First row of the page.
    pub fn row_offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_truncated_to_page_start() {
        let page = PageRequest::from_limit_offset(10, 5).unwrap();
        assert_eq!(page, PageRequest { page: 0, size: 10 });
        assert_eq!(page.row_offset(), 0);

        let page = PageRequest::from_limit_offset(2, 3).unwrap();
        assert_eq!(page, PageRequest { page: 1, size: 2 });
        assert_eq!(page.row_offset(), 2);
    }

    #[test]
    fn non_positive_limit_has_no_page() {
        assert_eq!(PageRequest::from_limit_offset(0, 0), None);
        assert_eq!(PageRequest::from_limit_offset(-3, 0), None);
    }

    #[test]
    fn negative_offset_is_first_page() {
        assert_eq!(
            PageRequest::from_limit_offset(4, -8),
            Some(PageRequest { page: 0, size: 4 })
        );
    }

    fn book(price: Decimal, genre: Genre) -> Book {
        Book {
            id: 1,
            title: "Murder at Noon".into(),
            isbn: "978-0000000001".into(),
            price,
            published_date: chrono::NaiveDate::from_ymd_opt(2023, 6, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            genre,
            description: None,
            rating: None,
            tags: Vec::new(),
            author_id: 1,
            publisher_id: 1,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(BookFilter::default().matches(&book(Decimal::new(1999, 2), Genre::Mystery)));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let exact = BookFilter {
            min_price: Some(Decimal::new(1999, 2)),
            max_price: Some(Decimal::new(1999, 2)),
            ..BookFilter::default()
        };
        assert!(exact.matches(&book(Decimal::new(1999, 2), Genre::Mystery)));
        assert!(!exact.matches(&book(Decimal::new(2000, 2), Genre::Mystery)));

        let mismatched = BookFilter {
            genre: Some(Genre::Science),
            ..exact
        };
        assert!(!mismatched.matches(&book(Decimal::new(1999, 2), Genre::Mystery)));
    }
}
