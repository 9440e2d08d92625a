//! Film endpoints
//!
//! - `GET /films?sort=&filter[genre]=&page[size]=&page[number]=&page[next]=`
//! - `GET /films/search?query=&page[...]`
//! - `GET /films/{film_id}`

use axum::{
    extract::{Path, State},
    Json,
};

use super::{found, parse_id};
use crate::api::extractors::{FilmFilterParams, PageParams, SearchParams, ValidatedQuery};
use crate::models::{Film, FilmDetails, ListResponse};
use crate::state::AppState;
use crate::{Error, Result};

pub async fn list_films(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<FilmFilterParams>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> Result<Json<ListResponse<Film>>> {
    let page = state
        .films
        .list(filters.sort.as_deref(), filters.genre, &page.into_request())
        .await?;
    found(page, state.films.entity())
}

pub async fn search_films(
    State(state): State<AppState>,
    ValidatedQuery(search): ValidatedQuery<SearchParams>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> Result<Json<ListResponse<Film>>> {
    let page = state
        .films
        .search(&search.query, &page.into_request())
        .await?;
    found(page, state.films.entity())
}

pub async fn film_details(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> Result<Json<FilmDetails>> {
    let id = parse_id(&film_id, "film_id")?;
    state
        .films
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("film"))
}
