//! `DateTime` GraphQL scalar: zone-less ISO-8601 local date-time.
//!
//! Output is `YYYY-MM-DDTHH:MM:SS` plus a 3, 6 or 9 digit fraction when the
//! sub-second part is non-zero. Input accepts `YYYY-MM-DDTHH:MM[:SS[.f{1,9}]]`
//! and nothing else: offsets, zone names and non-string values are rejected.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("Invalid DateTime format: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(pub NaiveDateTime);

impl DateTime {
    /// Strict ISO local date-time parse.
    pub fn parse_str(s: &str) -> Result<Self, DateTimeError> {
        let invalid = || DateTimeError::Invalid(s.to_string());
        if !has_local_date_time_shape(s) {
            return Err(invalid());
        }
        let format = if s.len() == MINUTES_FORMAT_LEN {
            MINUTES_FORMAT
        } else {
            OUTPUT_FORMAT
        };
        NaiveDateTime::parse_from_str(s, format)
            .map(DateTime)
            .map_err(|_| invalid())
    }

    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(value: NaiveDateTime) -> Self {
        DateTime(value)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(OUTPUT_FORMAT))
    }
}

/// A custom scalar that represents a local date-time without offset.
#[Scalar(name = "DateTime")]
impl ScalarType for DateTime {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => DateTime::parse_str(s).map_err(InputValueError::custom),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// Length of `YYYY-MM-DDTHH:MM`.
const MINUTES_FORMAT_LEN: usize = 16;

/// Checks the exact character layout; chrono alone accepts single-digit
/// fields, over-long fractions and leap seconds.
fn has_local_date_time_shape(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < MINUTES_FORMAT_LEN {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
    let head_ok = digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b'T'
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16);
    if !head_ok {
        return false;
    }
    let rest = &b[MINUTES_FORMAT_LEN..];
    if rest.is_empty() {
        return true;
    }
    if rest.len() < 3 || rest[0] != b':' || !rest[1..3].iter().all(u8::is_ascii_digit) {
        return false;
    }
    // chrono reads second 60 as a leap second; local date-times stop at 59.
    if rest[1] > b'5' {
        return false;
    }
    let fraction = &rest[3..];
    if fraction.is_empty() {
        return true;
    }
    fraction[0] == b'.'
        && (2..=10).contains(&fraction.len())
        && fraction[1..].iter().all(u8::is_ascii_digit)
}
