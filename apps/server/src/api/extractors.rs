//! Query-string extractors with validation.
//!
//! Bracketed parameter names (`page[size]`, `filter[genre]`) are mapped with
//! serde renames. Malformed or out-of-range values are rejected with 422 and a
//! `{"detail": ...}` body, like every other client error.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::PageRequest;
use crate::Error;

pub const MIN_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Deserializes the query string into `T` and runs its validation rules.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::Validation(e.body_text()))?;
        value
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;
        Ok(Self(value))
    }
}

fn default_page_size() -> u32 {
    MIN_PAGE_SIZE
}

fn default_page_number() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageParams {
    #[serde(rename = "page[size]", default = "default_page_size")]
    #[validate(range(min = 10, max = 100))]
    pub size: u32,

    /// Ignored when `page[next]` is present.
    #[serde(rename = "page[number]", default = "default_page_number")]
    #[validate(range(min = 1))]
    pub number: u32,

    #[serde(rename = "page[next]")]
    pub next: Option<String>,
}

impl PageParams {
    pub fn into_request(self) -> PageRequest {
        PageRequest::new(self.size, self.number, self.next)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FilmFilterParams {
    pub sort: Option<String>,

    #[serde(rename = "filter[genre]")]
    pub genre: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 3))]
    pub query: String,
}
