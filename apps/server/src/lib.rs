//! Marquee - read-only movie catalog API
//!
//! Serves films, genres and persons out of Elasticsearch with:
//! - Offset and cursor (`search_after`) pagination
//! - Full-text search with fuzzy matching
//! - An in-process response cache
//! - Prometheus metrics and OpenTelemetry tracing

#![allow(clippy::type_complexity)]

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
