//! Genre endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use super::{found, parse_id};
use crate::api::extractors::{PageParams, ValidatedQuery};
use crate::models::{Genre, ListResponse};
use crate::state::AppState;
use crate::{Error, Result};

pub async fn list_genres(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> Result<Json<ListResponse<Genre>>> {
    let page = state.genres.list(&page.into_request()).await?;
    found(page, state.genres.entity())
}

pub async fn genre_details(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<Json<Genre>> {
    let id = parse_id(&genre_id, "genre_id")?;
    state
        .genres
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("genre"))
}
