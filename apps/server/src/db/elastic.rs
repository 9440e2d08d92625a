//! Elasticsearch transport for [`SearchBackend`].
//!
//! Speaks the REST API directly over a shared `reqwest` client: `POST
//! /{index}/_search` for searches and `GET /{index}/_doc/{id}` for lookups.

use async_trait::async_trait;
use axum::body::Bytes;
use marquee_query::backend::{GetDocumentResponse, SearchResponse};
use marquee_query::{BackendError, SearchBackend, SearchHits, SearchRequest};
use reqwest::StatusCode;
use serde_json::Value as JsonValue;
use std::time::Instant;
use url::Url;

use crate::config::ElasticsearchConfig;

#[derive(Debug, Clone)]
pub struct ElasticsearchBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl ElasticsearchBackend {
    pub fn new(config: &ElasticsearchConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build Elasticsearch client: {e}"))?;
        let base_url = Url::parse(&config.url)
            .map_err(|e| anyhow::anyhow!("Invalid Elasticsearch URL '{}': {e}", config.url))?;

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                BackendError::Unreachable(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        operation: &'static str,
        index: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Bytes), BackendError> {
        let start = Instant::now();
        let result = async {
            let response = request.send().await.map_err(transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(transport_error)?;
            Ok::<_, BackendError>((status, body))
        }
        .await;

        crate::metrics::BACKEND_REQUEST_DURATION_SECONDS
            .with_label_values(&[operation, index])
            .observe(start.elapsed().as_secs_f64());
        if let Err(e) = &result {
            record_error(operation, e);
        }
        result
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    #[tracing::instrument(name = "es.search", skip(self, request), fields(index = %index, size = request.size))]
    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchHits, BackendError> {
        let url = self.endpoint(&[index, "_search"])?;
        let body = request.to_json();
        tracing::debug!(query = %body, "Sending search request");

        let (status, bytes) = self
            .send("search", index, self.client.post(url).json(&body))
            .await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Index not found, returning empty result");
            return Ok(SearchHits::empty());
        }
        if !status.is_success() {
            let err = status_error(status, &bytes);
            record_error("search", &err);
            return Err(err);
        }

        let hits = SearchResponse::from_slice(&bytes)
            .and_then(SearchResponse::into_hits)
            .map_err(|e| {
                record_error("search", &e);
                e
            })?;
        tracing::debug!(total = hits.total, returned = hits.items.len(), "Search completed");
        Ok(hits)
    }

    #[tracing::instrument(name = "es.get", skip(self), fields(index = %index))]
    async fn get(&self, index: &str, id: &str) -> Result<Option<JsonValue>, BackendError> {
        let url = self.endpoint(&[index, "_doc", id])?;
        let (status, bytes) = self.send("get", index, self.client.get(url)).await?;

        // Missing documents and missing indices both answer 404.
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let err = status_error(status, &bytes);
            record_error("get", &err);
            return Err(err);
        }

        GetDocumentResponse::from_slice(&bytes)
            .map(GetDocumentResponse::into_document)
            .map_err(|e| {
                record_error("get", &e);
                e
            })
    }
}

fn transport_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Unreachable(e.to_string())
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> BackendError {
    const MAX_BODY: usize = 512;
    let body = String::from_utf8_lossy(body);
    let body: String = body.chars().take(MAX_BODY).collect();
    BackendError::Status {
        status: status.as_u16(),
        body,
    }
}

fn record_error(operation: &str, error: &BackendError) {
    let kind = match error {
        BackendError::Unreachable(_) => "unreachable",
        BackendError::Timeout => "timeout",
        BackendError::Status { .. } => "status",
        BackendError::MalformedResponse(_) => "malformed",
    };
    crate::metrics::BACKEND_ERRORS_TOTAL
        .with_label_values(&[operation, kind])
        .inc();
}
