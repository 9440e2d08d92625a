//! Film queries.

use marquee_query::{NestedFilter, Page, QueryBuilder, SortSpec};
use serde::Serialize;
use uuid::Uuid;

use super::catalog::{CatalogService, PageRequest};
use crate::models::{Film, FilmDetails};
use crate::{Error, Result};

/// Sort tokens accepted by the film list.
pub const FILM_SORTS: [&str; 2] = ["imdb_rating", "-imdb_rating"];

/// Nested collections a person can appear in.
const PERSON_ROLES: [&str; 3] = ["actors", "writers", "directors"];

#[derive(Serialize)]
struct ListKey<'a> {
    sort: Option<&'a str>,
    genre: Option<Uuid>,
}

#[derive(Clone)]
pub struct FilmService {
    catalog: CatalogService,
}

impl FilmService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    pub fn entity(&self) -> &'static str {
        self.catalog.entity()
    }

    /// Films, optionally restricted to one genre and sorted by rating.
    pub async fn list(
        &self,
        sort: Option<&str>,
        genre: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<Page<Film>> {
        if let Some(sort) = sort {
            if !FILM_SORTS.contains(&sort) {
                return Err(Error::Validation(format!(
                    "sort must be one of: {}",
                    FILM_SORTS.join(", ")
                )));
            }
        }

        let mut builder = QueryBuilder::new(SortSpec::parse(sort)?);
        if let Some(genre) = genre {
            builder = builder.nested_filter(NestedFilter::new("genre", "id", genre.to_string()));
        }

        self.catalog
            .page("list", &ListKey { sort, genre }, page, builder)
            .await
    }

    /// Fuzzy full-text search, best matches first.
    pub async fn search(&self, query: &str, page: &PageRequest) -> Result<Page<Film>> {
        let builder = QueryBuilder::new(SortSpec::parse(Some("-_score"))?).search(query, Some("title"));
        self.catalog.page("search", query, page, builder).await
    }

    /// Films a person acted in, wrote or directed.
    pub async fn featuring(&self, person: Uuid, page: &PageRequest) -> Result<Page<Film>> {
        let builder = QueryBuilder::new(SortSpec::parse(Some("-imdb_rating"))?)
            .nested_filter(NestedFilter::any_of(PERSON_ROLES, "id", person.to_string()));
        self.catalog.page("featuring", &person, page, builder).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<FilmDetails>> {
        self.catalog.get(&id.to_string()).await
    }
}
