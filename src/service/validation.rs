//! Input checks shared by reads and mutations.

use crate::error::AppError;
use crate::response::FieldError;

/// Parses a textual integer id.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse().map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// Same as `parse_id`, shaped as a payload error on `field`.
pub fn parse_id_field(field: &str, raw: &str) -> Result<i64, FieldError> {
    parse_id(raw).map_err(|_| FieldError::invalid_id(field, raw))
}
