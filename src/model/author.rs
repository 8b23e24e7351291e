use crate::model::clock::whole_years_between;
use chrono::NaiveDateTime;

/// Stored author row.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all authors.
    pub email: String,
    pub birth_date: Option<NaiveDateTime>,
    pub biography: Option<String>,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years at `now`; None without a birth date.
    pub fn age_at(&self, now: NaiveDateTime) -> Option<i32> {
        self.birth_date.map(|birth| whole_years_between(birth, now))
    }
}

/// Column values for inserting or fully replacing an author.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: Option<NaiveDateTime>,
    pub biography: Option<String>,
}

impl AuthorDraft {
    pub fn into_author(self, id: i64) -> Author {
        Author {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            birth_date: self.birth_date,
            biography: self.biography,
        }
    }
}
