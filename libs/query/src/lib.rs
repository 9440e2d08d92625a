//! Query construction and search-after pagination for the Marquee catalog.
//!
//! - [`SortSpec`]: sort expressions ending in a unique tiebreaker
//! - [`Cursor`]: opaque, stateless continuation tokens
//! - [`QueryBuilder`]: free text, nested filters, sort and pagination into a [`SearchRequest`]
//! - [`SearchBackend`]: one round trip against the document store
//! - [`Page`]: result envelope with the next cursor
//!
//! Nothing here performs I/O on its own or logs.

#![forbid(unsafe_code)]

pub mod backend;
pub mod cursor;
mod error;
pub mod page;
pub mod query;
pub mod sort;

pub use backend::{SearchBackend, SearchHits};
pub use cursor::{Cursor, SortValue};
pub use error::{BackendError, QueryError, Result};
pub use page::Page;
pub use query::{NestedFilter, Pagination, QueryBuilder, SearchRequest, TextSearch, DEFAULT_PAGE_SIZE};
pub use sort::{SortDirection, SortField, SortSpec, DEFAULT_TIEBREAKER};

/// Build `request`, run it against `index` and assemble the page.
///
/// Errors from building the request are returned before the backend is touched.
pub async fn execute(
    backend: &dyn SearchBackend,
    index: &str,
    builder: QueryBuilder,
) -> Result<Page<serde_json::Value>> {
    let request = builder.build()?;
    let hits = backend.search(index, &request).await?;
    Page::assemble(hits, &request)
}
