use crate::model::{Author, Book, BookFilter, BookFilterInput, Publisher, SearchResult};
use crate::schema::objects::{gql, service};
use crate::service::{DEFAULT_AUTHOR_LIMIT, DEFAULT_BOOK_LIMIT};
use async_graphql::{Context, Object, Result, ID};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Authors in id order, at most `limit` (default 10).
    async fn authors(&self, ctx: &Context<'_>, limit: Option<i32>) -> Result<Vec<Author>> {
        service(ctx)?
            .authors(limit.unwrap_or(DEFAULT_AUTHOR_LIMIT))
            .await
            .map_err(gql)
    }

    async fn author_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Author>> {
        service(ctx)?.author_by_id(&id).await.map_err(gql)
    }

    async fn publishers(&self, ctx: &Context<'_>) -> Result<Vec<Publisher>> {
        service(ctx)?.publishers().await.map_err(gql)
    }

    async fn publisher_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Publisher>> {
        service(ctx)?.publisher_by_id(&id).await.map_err(gql)
    }

    /// Filtered books. Paging is by page: `offset / limit` selects the page,
    /// so an offset inside a page returns that whole page.
    async fn books(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
        filter: Option<BookFilterInput>,
    ) -> Result<Vec<Book>> {
        let filter = filter.map(BookFilter::from).unwrap_or_default();
        service(ctx)?
            .books(limit.unwrap_or(DEFAULT_BOOK_LIMIT), offset.unwrap_or(0), &filter)
            .await
            .map_err(gql)
    }

    async fn book_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        service(ctx)?.book_by_id(&id).await.map_err(gql)
    }

    async fn books_by_author(&self, ctx: &Context<'_>, author_id: ID) -> Result<Vec<Book>> {
        service(ctx)?.books_by_author(&author_id).await.map_err(gql)
    }

    #[graphql(deprecation = "Use books with limit and offset")]
    async fn all_books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        service(ctx)?.all_books().await.map_err(gql)
    }

    /// Books, then authors, then publishers containing `query` (case-insensitive).
    async fn search_books(&self, ctx: &Context<'_>, query: String) -> Result<Vec<SearchResult>> {
        service(ctx)?.search(&query).await.map_err(gql)
    }
}
