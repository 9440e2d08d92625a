//! Shared application state
//!
//! Created once at startup and cloned into every handler. The backend client
//! and the response cache are shared by all entity services.

use anyhow::Context;
use marquee_query::SearchBackend;
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::db::ElasticsearchBackend;
use crate::services::{CatalogIndex, CatalogService, FilmService, GenreService, PersonService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<ResponseCache>,
    pub films: FilmService,
    pub genres: GenreService,
    pub persons: PersonService,
}

impl AppState {
    /// Build the state against the Elasticsearch cluster named in `config`.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let backend = ElasticsearchBackend::new(&config.elasticsearch)
            .context("Failed to create Elasticsearch backend")?;

        tracing::info!(
            url = %config.elasticsearch.url,
            timeout_seconds = config.elasticsearch.timeout_seconds,
            "Elasticsearch backend configured"
        );

        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Build the state on top of any [`SearchBackend`].
    pub fn with_backend(config: Config, backend: Arc<dyn SearchBackend>) -> Self {
        let cache = Arc::new(ResponseCache::new(&config.cache));
        let window = config.elasticsearch.max_result_window;
        let indices = &config.elasticsearch.indices;

        let catalog = |entity: &'static str, index: &str| {
            CatalogService::new(
                backend.clone(),
                cache.clone(),
                CatalogIndex {
                    entity,
                    index: index.to_string(),
                },
                window,
            )
        };

        let films = FilmService::new(catalog("films", &indices.films));
        let genres = GenreService::new(catalog("genres", &indices.genres));
        let persons = PersonService::new(catalog("persons", &indices.persons));

        Self {
            config: Arc::new(config),
            cache,
            films,
            genres,
            persons,
        }
    }
}
