//! Seed catalog shared by the API tests.

use marquee::Config;
use serde_json::{json, Value};

use super::FakeBackend;

pub const FILM_COUNT: usize = 25;
/// Films with "Star" in the title.
pub const STAR_FILMS: usize = 5;

pub const GENRE_DRAMA: &str = "10000000-0000-4000-8000-000000000001";
pub const GENRE_COMEDY: &str = "10000000-0000-4000-8000-000000000002";
/// A genre no film belongs to.
pub const GENRE_DOCUMENTARY: &str = "10000000-0000-4000-8000-000000000003";

pub const PERSON_HAMILL: &str = "20000000-0000-4000-8000-000000000001";
pub const PERSON_LUCAS: &str = "20000000-0000-4000-8000-000000000002";
/// A person credited on no film.
pub const PERSON_EXTRA: &str = "20000000-0000-4000-8000-000000000003";

/// Well-formed id that matches no document.
pub const MISSING_ID: &str = "99999999-0000-4000-8000-000000000000";

pub fn film_id(i: usize) -> String {
    format!("30000000-0000-4000-8000-{i:012}")
}

/// Backend seeded under the index names in `config`.
pub fn catalog(config: &Config) -> FakeBackend {
    let indices = &config.elasticsearch.indices;
    FakeBackend::default()
        .with_index(&indices.films, films())
        .with_index(&indices.genres, genres())
        .with_index(&indices.persons, persons())
}

pub fn films() -> Vec<Value> {
    (0..FILM_COUNT)
        .map(|i| {
            let title = if i < STAR_FILMS {
                format!("Star Film {i}")
            } else {
                format!("Film {i}")
            };
            let genre = if i % 2 == 0 {
                json!([{ "id": GENRE_DRAMA, "name": "Drama" }])
            } else {
                json!([{ "id": GENRE_COMEDY, "name": "Comedy" }])
            };
            let actors = if i < 3 {
                json!([{ "id": PERSON_HAMILL, "name": "Mark Hamill" }])
            } else {
                json!([])
            };
            let lucas = json!([{ "id": PERSON_LUCAS, "name": "George Lucas" }]);

            json!({
                "id": film_id(i),
                "title": title,
                // Ratings repeat so the id tiebreaker matters.
                "imdb_rating": (i % 10) as f64 / 2.0 + 4.0,
                "description": format!("Description of film {i}"),
                "genre": genre,
                "actors": actors,
                "writers": if i == 20 { lucas.clone() } else { json!([]) },
                "directors": if i == 0 || i == 10 { lucas } else { json!([]) },
            })
        })
        .collect()
}

pub fn genres() -> Vec<Value> {
    vec![
        json!({ "id": GENRE_DRAMA, "name": "Drama", "description": "Serious stories" }),
        json!({ "id": GENRE_COMEDY, "name": "Comedy" }),
        json!({ "id": GENRE_DOCUMENTARY, "name": "Documentary", "description": null }),
    ]
}

pub fn persons() -> Vec<Value> {
    vec![
        json!({
            "id": PERSON_HAMILL,
            "name": "Mark Hamill",
            "roles": { "actor": [film_id(0), film_id(1), film_id(2)] }
        }),
        json!({
            "id": PERSON_LUCAS,
            "name": "George Lucas",
            "roles": { "writer": [film_id(20)], "director": [film_id(0), film_id(10)] }
        }),
        json!({ "id": PERSON_EXTRA, "name": "Background Extra" }),
    ]
}
