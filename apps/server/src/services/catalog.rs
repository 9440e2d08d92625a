//! Generic read service over one catalog index.
//!
//! Entity services describe *what* to query with a [`QueryBuilder`]; this
//! service applies pagination and the offset window, runs the query through
//! the response cache and turns raw documents into typed models.

use marquee_query::{
    BackendError, Cursor, Page, Pagination, QueryBuilder, QueryError, SearchBackend,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::{Error, Result};

/// Which index an entity lives in.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    /// Plural entity name, used for cache namespaces and not-found messages.
    pub entity: &'static str,
    pub index: String,
}

/// Pagination parameters exactly as the client sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub size: u32,
    pub page_number: u32,
    pub next: Option<String>,
}

impl PageRequest {
    pub fn new(size: u32, page_number: u32, next: Option<String>) -> Self {
        Self {
            size,
            page_number,
            next: next.filter(|token| !token.is_empty()),
        }
    }

    /// A continuation token takes precedence over the page number.
    pub fn pagination(&self) -> marquee_query::Result<Pagination> {
        match &self.next {
            Some(token) => Ok(Pagination::cursor(Cursor::decode(token)?, self.size)),
            None => Ok(Pagination::offset(self.page_number, self.size)),
        }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn SearchBackend>,
    cache: Arc<ResponseCache>,
    catalog: CatalogIndex,
    max_result_window: u64,
}

impl CatalogService {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        cache: Arc<ResponseCache>,
        catalog: CatalogIndex,
        max_result_window: u64,
    ) -> Self {
        Self {
            backend,
            cache,
            catalog,
            max_result_window,
        }
    }

    pub fn entity(&self) -> &'static str {
        self.catalog.entity
    }

    /// Run `builder` for one page, cached under `operation` and `params`.
    ///
    /// The page token is decoded before the cache or the backend is consulted,
    /// so a malformed token never costs a round trip.
    pub async fn page<T, P>(
        &self,
        operation: &str,
        params: &P,
        page: &PageRequest,
        builder: QueryBuilder,
    ) -> Result<Page<T>>
    where
        T: Serialize + DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let builder = builder
            .pagination(page.pagination()?)
            .max_result_window(self.max_result_window);
        let namespace = format!("{}:{}", self.catalog.entity, operation);

        self.cache
            .get_or_fetch(&namespace, &(params, page), || async {
                let raw =
                    marquee_query::execute(self.backend.as_ref(), &self.catalog.index, builder)
                        .await?;
                let page = raw
                    .try_map(serde_json::from_value::<T>)
                    .map_err(|e| self.malformed(e))?;

                tracing::debug!(
                    entity = self.catalog.entity,
                    operation,
                    total = page.total,
                    returned = page.items.len(),
                    has_next = page.next.is_some(),
                    "Catalog page fetched"
                );
                Ok::<_, Error>(page)
            })
            .await
    }

    /// Fetch one document by id.
    pub async fn get<T>(&self, id: &str) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let namespace = format!("{}:get", self.catalog.entity);

        self.cache
            .get_or_fetch(&namespace, id, || async {
                let document = self
                    .backend
                    .get(&self.catalog.index, id)
                    .await
                    .map_err(QueryError::from)?;
                document
                    .map(serde_json::from_value::<T>)
                    .transpose()
                    .map_err(|e| self.malformed(e))
            })
            .await
    }

    fn malformed(&self, e: serde_json::Error) -> Error {
        Error::Query(QueryError::Backend(BackendError::MalformedResponse(format!(
            "unexpected {} document: {e}",
            self.catalog.entity
        ))))
    }
}
