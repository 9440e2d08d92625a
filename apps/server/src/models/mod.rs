//! Response models for the catalog API
//!
//! Documents are deserialized straight from the index `_source`; fields the
//! API does not expose are ignored.

pub mod film;
pub mod genre;
pub mod person;

pub use film::{Film, FilmDetails};
pub use genre::Genre;
pub use person::{Person, PersonDetails, Roles};

use marquee_query::Page;
use serde::{Deserialize, Serialize};

/// `{count, next, results}` envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Total number of matches, not the length of `results`.
    pub count: u64,
    /// Value for `page[next]` to fetch the following page.
    pub next: Option<String>,
    pub results: Vec<T>,
}

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            count: page.total,
            next: page.next,
            results: page.items,
        }
    }
}
