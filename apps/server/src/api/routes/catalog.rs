//! Catalog API routes, nested under `/api/v1`.
//!
//! Static segments (`/search`) are registered alongside the `/:id` captures;
//! axum prefers the static match.

use crate::api::handlers::{films, genres, persons};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/films", get(films::list_films))
        .route("/films/search", get(films::search_films))
        .route("/films/:film_id", get(films::film_details))
        .route("/genres", get(genres::list_genres))
        .route("/genres/:genre_id", get(genres::genre_details))
        .route("/persons", get(persons::list_persons))
        .route("/persons/search", get(persons::search_persons))
        .route("/persons/:person_id", get(persons::person_details))
        .route("/persons/:person_id/film", get(persons::person_films))
}
