//! Search execution contract.
//!
//! Implementations issue one round trip per call and never retry; retry policy
//! belongs to the caller.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::cursor::SortValue;
use crate::error::BackendError;
use crate::query::SearchRequest;

/// Normalized outcome of one search round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Raw documents in backend order.
    pub items: Vec<JsonValue>,
    /// Total matches regardless of page size.
    pub total: u64,
    /// Sort values of the last item, empty when there are no items.
    pub last_sort: Vec<SortValue>,
}

impl SearchHits {
    /// The outcome reported for a missing index.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a search against `index`.
    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchHits, BackendError>;

    /// Fetch a single document by id; `None` when it (or the index) does not exist.
    async fn get(&self, index: &str, id: &str) -> Result<Option<JsonValue>, BackendError>;
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: SearchHitsResponse,
}

#[derive(Debug, Deserialize)]
pub struct SearchHitsResponse {
    pub total: Option<SearchHitsTotalResponse>,
    pub hits: Vec<SearchHitResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHitsTotalResponse {
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchHitResponse {
    #[serde(rename = "_id")]
    pub id: Option<String>,

    #[serde(rename = "_source")]
    pub source: Option<JsonValue>,

    #[serde(default)]
    pub sort: Vec<JsonValue>,
}

#[derive(Debug, Deserialize)]
pub struct GetDocumentResponse {
    pub found: bool,

    #[serde(rename = "_source")]
    pub source: Option<JsonValue>,
}

impl SearchResponse {
    /// Parse a raw search response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, BackendError> {
        serde_json::from_slice(body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    /// Flatten into [`SearchHits`], taking the cursor source from the last hit.
    pub fn into_hits(self) -> Result<SearchHits, BackendError> {
        let hits = self.hits.hits;
        let total = self
            .hits
            .total
            .map(|t| t.value)
            .unwrap_or(hits.len() as u64);

        let last_sort = match hits.last() {
            Some(last) => last
                .sort
                .iter()
                .cloned()
                .map(|v| {
                    SortValue::from_json(v).ok_or_else(|| {
                        BackendError::MalformedResponse("non-scalar sort value".to_string())
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let items = hits
            .into_iter()
            .map(|hit| {
                hit.source.ok_or_else(|| {
                    BackendError::MalformedResponse(format!(
                        "hit {} has no _source",
                        hit.id.as_deref().unwrap_or("<unknown>")
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchHits {
            items,
            total,
            last_sort,
        })
    }
}

impl GetDocumentResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, BackendError> {
        serde_json::from_slice(body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    pub fn into_document(self) -> Option<JsonValue> {
        if self.found {
            self.source
        } else {
            None
        }
    }
}
