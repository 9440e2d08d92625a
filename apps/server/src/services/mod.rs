//! Business logic layer
//!
//! One service per catalog entity, all built on the generic [`CatalogService`].

pub mod catalog;
pub mod films;
pub mod genres;
pub mod persons;

pub use catalog::{CatalogIndex, CatalogService, PageRequest};
pub use films::FilmService;
pub use genres::GenreService;
pub use persons::PersonService;
