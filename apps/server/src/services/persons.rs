//! Person queries.

use marquee_query::{Page, QueryBuilder, SortSpec};
use uuid::Uuid;

use super::catalog::{CatalogService, PageRequest};
use crate::models::{Person, PersonDetails};
use crate::Result;

#[derive(Clone)]
pub struct PersonService {
    catalog: CatalogService,
}

impl PersonService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    pub fn entity(&self) -> &'static str {
        self.catalog.entity()
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<Person>> {
        let builder = QueryBuilder::new(SortSpec::parse(None)?);
        self.catalog.page("list", &(), page, builder).await
    }

    /// Fuzzy name search, best matches first.
    pub async fn search(&self, query: &str, page: &PageRequest) -> Result<Page<Person>> {
        let builder = QueryBuilder::new(SortSpec::parse(Some("-_score"))?).search(query, Some("name"));
        self.catalog.page("search", query, page, builder).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PersonDetails>> {
        self.catalog.get(&id.to_string()).await
    }
}
