//! Prometheus metrics for the catalog API.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marquee_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "marquee_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "marquee_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Search Backend Metrics

    /// Backend round trip duration by operation (`search`, `get`) and index
    pub static ref BACKEND_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "marquee_backend_request_duration_seconds",
        "Search backend round trip duration in seconds",
        &["operation", "index"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register BACKEND_REQUEST_DURATION_SECONDS");

    pub static ref BACKEND_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marquee_backend_errors_total",
        "Total number of failed search backend round trips",
        &["operation", "kind"]
    )
    .expect("Failed to register BACKEND_ERRORS_TOTAL");

    // Cache Metrics

    /// Cache lookups by namespace and outcome (`hit`, `miss`)
    pub static ref CACHE_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marquee_cache_requests_total",
        "Total number of response cache lookups",
        &["namespace", "outcome"]
    )
    .expect("Failed to register CACHE_REQUESTS_TOTAL");
}

/// Collapse document ids in API paths so label cardinality stays bounded.
///
/// `/api/v1/films/<id>` becomes `/api/v1/films/{id}`; `search` is a route, not an id.
pub fn sanitize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let segments: Vec<&str> = trimmed.split('/').collect();
    match segments.as_slice() {
        ["", "api", version, entity, id, rest @ ..] if *id != "search" => {
            let mut out = format!("/api/{version}/{entity}/{{id}}");
            for segment in rest {
                out.push('/');
                out.push_str(segment);
            }
            out
        }
        _ => trimmed.to_string(),
    }
}

/// Catalog entity addressed by an API path (`films`, `genres`, `persons`).
pub fn extract_entity(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/api/")?;
    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    let _version = segments.next()?;
    segments.next()
}
