//! Mutation payload objects. `success` is derived from the payload variant.

use crate::model::{Author, Book};
use crate::response::{FieldError, Payload};
use async_graphql::{Object, ID};

pub struct AuthorPayload(pub Payload<Author>);

#[Object]
impl AuthorPayload {
    async fn author(&self) -> Option<&Author> {
        self.0.entity()
    }

    async fn errors(&self) -> &[FieldError] {
        self.0.errors()
    }

    async fn success(&self) -> bool {
        self.0.is_success()
    }
}

pub struct BookPayload(pub Payload<Book>);

#[Object]
impl BookPayload {
    async fn book(&self) -> Option<&Book> {
        self.0.entity()
    }

    async fn errors(&self) -> &[FieldError] {
        self.0.errors()
    }

    async fn success(&self) -> bool {
        self.0.is_success()
    }
}

/// `id` echoes the deleted id on success.
pub struct DeletePayload(pub Payload<String>);

#[Object]
impl DeletePayload {
    async fn id(&self) -> Option<ID> {
        self.0.entity().map(|id| ID(id.clone()))
    }

    async fn errors(&self) -> &[FieldError] {
        self.0.errors()
    }

    async fn success(&self) -> bool {
        self.0.is_success()
    }
}
