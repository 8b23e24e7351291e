//! Mutation result envelope: either the entity or the errors explaining why not.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    DuplicateEmail,
    AuthorNotFound,
    PublisherNotFound,
    BookNotFound,
    InvalidId,
    CreationError,
    UpdateError,
    DeleteError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::AuthorNotFound => "AUTHOR_NOT_FOUND",
            ErrorCode::PublisherNotFound => "PUBLISHER_NOT_FOUND",
            ErrorCode::BookNotFound => "BOOK_NOT_FOUND",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::CreationError => "CREATION_ERROR",
            ErrorCode::UpdateError => "UPDATE_ERROR",
            ErrorCode::DeleteError => "DELETE_ERROR",
        }
    }
}

/// One business failure, tied to the input field that caused it. Exposed in
/// GraphQL as `ErrorDetail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: ErrorCode,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    /// Unexpected failure not tied to an input field.
    pub fn general(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new("general", message, code)
    }

    pub fn invalid_id(field: &str, raw: &str) -> Self {
        Self::new(field, format!("Invalid id: {}", raw), ErrorCode::InvalidId)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Ok(T),
    Failed(Vec<FieldError>),
}

impl<T> Payload<T> {
    pub fn failed(detail: FieldError) -> Self {
        Payload::Failed(vec![detail])
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Payload::Ok(_))
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            Payload::Ok(v) => Some(v),
            Payload::Failed(_) => None,
        }
    }

    /// Empty on success.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Payload::Ok(_) => &[],
            Payload::Failed(errors) => errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_derived_from_variant() {
        let ok: Payload<i32> = Payload::Ok(1);
        assert!(ok.is_success());
        assert_eq!(ok.entity(), Some(&1));
        assert!(ok.errors().is_empty());

        let failed: Payload<i32> = Payload::failed(FieldError::general(ErrorCode::DeleteError, "boom"));
        assert!(!failed.is_success());
        assert_eq!(failed.entity(), None);
        assert_eq!(failed.errors()[0].field, "general");
        assert_eq!(failed.errors()[0].code.as_str(), "DELETE_ERROR");
    }

    #[test]
    fn invalid_id_message_echoes_raw_input() {
        let detail = FieldError::invalid_id("authorId", "x1");
        assert_eq!(detail.message, "Invalid id: x1");
        assert_eq!(detail.code, ErrorCode::InvalidId);
    }
}
