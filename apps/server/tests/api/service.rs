//! Health, metrics, headers and caching.

use crate::support::{assert_status, film_id, with_test_app, with_test_app_with_config};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_and_root() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/health").await?;
            assert_status(status, StatusCode::OK, "health");
            assert_eq!(body, serde_json::json!({ "status": "ok", "service": "marquee" }));

            let (status, body) = app.get_json("/").await?;
            assert_status(status, StatusCode::OK, "root");
            assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
            assert_eq!(body["api"], "/api/v1");

            let (status, _, _) = app.request(Method::GET, "/favicon.ico").await?;
            assert_status(status, StatusCode::NO_CONTENT, "favicon");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn metrics_are_exposed() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.get_json("/api/v1/genres").await?;

            let (status, headers, body) = app.request(Method::GET, "/metrics").await?;
            assert_status(status, StatusCode::OK, "metrics");
            assert!(headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("text/plain")));

            let text = String::from_utf8(body.to_vec())?;
            assert!(text.contains("marquee_http_requests_total"), "{text}");
            assert!(text.contains("marquee_cache_requests_total"), "{text}");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn responses_carry_request_ids() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, headers, _) = app.request(Method::GET, "/health").await?;
            let request_id = headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .expect("x-request-id header");
            assert!(uuid::Uuid::parse_str(request_id).is_ok());
            assert!(headers.get("x-trace-id").is_some());
            assert!(headers.get("x-correlation-id").is_none());

            let (_, headers, _) = app
                .request_with_extra_headers(Method::GET, "/health", &[("x-request-id", "client-42")])
                .await?;
            assert_eq!(
                headers.get("x-correlation-id").and_then(|v| v.to_str().ok()),
                Some("client-42")
            );
            assert_ne!(
                headers.get("x-request-id").and_then(|v| v.to_str().ok()),
                Some("client-42")
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn repeated_requests_are_served_from_cache() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (_, first) = app.get_json("/api/v1/films?sort=-imdb_rating").await?;
            let (_, second) = app.get_json("/api/v1/films?sort=-imdb_rating").await?;
            assert_eq!(first, second);
            assert_eq!(app.backend.calls(), 1);

            // A different page is a different entry.
            app.get_json("/api/v1/films?sort=-imdb_rating&page[number]=2")
                .await?;
            assert_eq!(app.backend.calls(), 2);

            let uri = format!("/api/v1/films/{}", film_id(5));
            app.get_json(&uri).await?;
            app.get_json(&uri).await?;
            assert_eq!(app.backend.calls(), 3);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn disabled_cache_always_searches() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.cache.enabled = false,
        |app| {
            Box::pin(async move {
                assert!(!app.state.cache.is_enabled());
                app.get_json("/api/v1/genres").await?;
                app.get_json("/api/v1/genres").await?;
                assert_eq!(app.backend.calls(), 2);
                Ok(())
            })
        },
    )
    .await
}

#[tokio::test]
async fn cors_allows_configured_origins() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.server.cors_origins = vec!["http://localhost:3000".to_string()],
        |app| {
            Box::pin(async move {
                let (status, headers, _) = app
                    .request_with_extra_headers(
                        Method::GET,
                        "/health",
                        &[("origin", "http://localhost:3000")],
                    )
                    .await?;
                assert_status(status, StatusCode::OK, "cors request");
                assert_eq!(
                    headers
                        .get("access-control-allow-origin")
                        .and_then(|v| v.to_str().ok()),
                    Some("http://localhost:3000")
                );

                let (_, headers, _) = app
                    .request_with_extra_headers(
                        Method::GET,
                        "/health",
                        &[("origin", "http://evil.example")],
                    )
                    .await?;
                assert!(headers.get("access-control-allow-origin").is_none());
                Ok(())
            })
        },
    )
    .await
}
