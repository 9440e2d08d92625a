//! Person endpoints
//!
//! `GET /persons/{person_id}/film` lists the films a person acted in, wrote or
//! directed.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{found, parse_id};
use crate::api::extractors::{PageParams, SearchParams, ValidatedQuery};
use crate::models::{Film, ListResponse, Person, PersonDetails};
use crate::state::AppState;
use crate::{Error, Result};

pub async fn list_persons(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> Result<Json<ListResponse<Person>>> {
    let page = state.persons.list(&page.into_request()).await?;
    found(page, state.persons.entity())
}

pub async fn search_persons(
    State(state): State<AppState>,
    ValidatedQuery(search): ValidatedQuery<SearchParams>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> Result<Json<ListResponse<Person>>> {
    let page = state
        .persons
        .search(&search.query, &page.into_request())
        .await?;
    found(page, state.persons.entity())
}

pub async fn person_details(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> Result<Json<PersonDetails>> {
    let id = parse_id(&person_id, "person_id")?;
    state
        .persons
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("person"))
}

pub async fn person_films(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> Result<Json<ListResponse<Film>>> {
    let id = parse_id(&person_id, "person_id")?;
    let page = state.films.featuring(id, &page.into_request()).await?;
    found(page, state.films.entity())
}
