//! Paginated result envelope.

use serde::{Deserialize, Serialize};

use crate::backend::SearchHits;
use crate::cursor;
use crate::error::{BackendError, QueryError};
use crate::query::SearchRequest;

/// One page of results with the token for the next page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
            next: None,
        }
    }

    /// No item matched. This is a valid outcome, not a failure.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }

    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            total: self.total,
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            next: self.next,
        })
    }
}

impl Page<serde_json::Value> {
    /// Assemble the envelope for `request` from the backend outcome.
    ///
    /// A full page yields a next cursor built from the last hit's sort values.
    /// This can hand out a cursor that leads to an empty page; it is suppressed
    /// only when the exact total proves nothing follows.
    ///
    /// Fails when the last hit's sort values cannot be encoded (non-finite numbers).
    pub fn assemble(hits: SearchHits, request: &SearchRequest) -> Result<Self, QueryError> {
        let returned = hits.items.len() as u64;
        let full_page = returned == u64::from(request.size);
        let seen = request.from.unwrap_or(0) + returned;
        let exhausted = returned == hits.total || (request.from.is_some() && seen >= hits.total);

        let next = if full_page && !exhausted && !hits.last_sort.is_empty() {
            let token = cursor::encode(&hits.last_sort).map_err(|e| {
                QueryError::Backend(BackendError::MalformedResponse(format!(
                    "unusable sort values in last hit: {e}"
                )))
            })?;
            Some(token)
        } else {
            None
        };

        Ok(Self {
            total: hits.total,
            items: hits.items,
            next,
        })
    }
}
