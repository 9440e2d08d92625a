//! Request handlers for API endpoints
//!
//! Handlers extract and validate parameters, call the entity service and
//! shape the result. Empty lists are reported as 404 `<entity> not found`.

pub mod films;
pub mod genres;
pub mod metrics;
pub mod persons;

use axum::Json;
use marquee_query::Page;
use uuid::Uuid;

use crate::models::ListResponse;
use crate::{Error, Result};

fn found<T>(page: Page<T>, entity: &str) -> Result<Json<ListResponse<T>>> {
    if page.is_empty() {
        return Err(Error::not_found(entity));
    }
    Ok(Json(page.into()))
}

fn parse_id(raw: &str, name: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::Validation(format!("{name} must be a UUID")))
}
