//! Typed bind values for dynamically built statements.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to one `$n` placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Text(String),
    I64(i64),
    Decimal(Decimal),
    Timestamp(NaiveDateTime),
}

impl PgBindValue {
    pub fn bind_to<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            PgBindValue::Text(s) => query.bind(s.as_str()),
            PgBindValue::I64(n) => query.bind(*n),
            PgBindValue::Decimal(d) => query.bind(*d),
            PgBindValue::Timestamp(t) => query.bind(*t),
        }
    }
}
