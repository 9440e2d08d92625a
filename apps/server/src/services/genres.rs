//! Genre queries.

use marquee_query::{Page, QueryBuilder, SortSpec};
use uuid::Uuid;

use super::catalog::{CatalogService, PageRequest};
use crate::models::Genre;
use crate::Result;

/// Genres are listed alphabetically by their keyword sub-field.
const GENRE_SORT: &str = "name.raw";

#[derive(Clone)]
pub struct GenreService {
    catalog: CatalogService,
}

impl GenreService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    pub fn entity(&self) -> &'static str {
        self.catalog.entity()
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<Genre>> {
        let builder = QueryBuilder::new(SortSpec::parse(Some(GENRE_SORT))?);
        self.catalog.page("list", &(), page, builder).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Genre>> {
        self.catalog.get(&id.to_string()).await
    }
}
