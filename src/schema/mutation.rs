use crate::model::{AuthorInput, BookInput};
use crate::schema::objects::service;
use crate::schema::payloads::{AuthorPayload, BookPayload, DeletePayload};
use async_graphql::{Context, Object, Result, ID};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_author(&self, ctx: &Context<'_>, input: AuthorInput) -> Result<AuthorPayload> {
        Ok(AuthorPayload(service(ctx)?.create_author(input).await))
    }

    async fn update_author(&self, ctx: &Context<'_>, id: ID, input: AuthorInput) -> Result<AuthorPayload> {
        Ok(AuthorPayload(service(ctx)?.update_author(&id, input).await))
    }

    async fn create_book(&self, ctx: &Context<'_>, input: BookInput) -> Result<BookPayload> {
        Ok(BookPayload(service(ctx)?.create_book(input).await))
    }

    async fn update_book(&self, ctx: &Context<'_>, id: ID, input: BookInput) -> Result<BookPayload> {
        Ok(BookPayload(service(ctx)?.update_book(&id, input).await))
    }

    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<DeletePayload> {
        Ok(DeletePayload(service(ctx)?.delete_book(&id).await))
    }

    /// Creates each book independently; one payload per input, in order.
    async fn create_books(&self, ctx: &Context<'_>, input: Vec<BookInput>) -> Result<Vec<BookPayload>> {
        let payloads = service(ctx)?.create_books(input).await;
        Ok(payloads.into_iter().map(BookPayload).collect())
    }
}
