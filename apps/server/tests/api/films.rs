//! Film endpoints: listing, filtering, sorting, search and details.

use crate::support::{
    assert_detail, assert_status, film_id, next_param, result_field, with_test_app, FILM_COUNT,
    GENRE_DOCUMENTARY, GENRE_DRAMA, MISSING_ID, PERSON_LUCAS, STAR_FILMS,
};
use axum::http::StatusCode;
use std::collections::HashSet;

#[tokio::test]
async fn first_page_uses_defaults() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/api/v1/films").await?;
            assert_status(status, StatusCode::OK, "list films");

            assert_eq!(body["count"], FILM_COUNT as u64);
            assert!(body["next"].is_string(), "full first page carries a token");
            let ids = result_field(&body, "id");
            let expected: Vec<String> = (0..10).map(film_id).collect();
            assert_eq!(ids, expected);

            // List items only expose the summary fields.
            let first = &body["results"][0];
            assert!(first.get("title").is_some());
            assert!(first.get("imdb_rating").is_some());
            assert!(first.get("description").is_none());
            assert!(first.get("genre").is_none());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn following_next_visits_every_film_once() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let mut seen = HashSet::new();
            let mut pages = 0;
            let mut uri = "/api/v1/films?sort=-imdb_rating&page[size]=10".to_string();

            loop {
                let (status, body) = app.get_json(&uri).await?;
                assert_status(status, StatusCode::OK, "films page");
                pages += 1;
                assert_eq!(body["count"], FILM_COUNT as u64, "count is the total, not the page");

                for id in result_field(&body, "id") {
                    assert!(seen.insert(id.clone()), "film {id} returned twice");
                }
                match body["next"].as_str() {
                    Some(token) => {
                        uri = format!(
                            "/api/v1/films?sort=-imdb_rating&page[size]=10&page[next]={}",
                            next_param(token)
                        );
                    }
                    None => break,
                }
                assert!(pages < 10, "pagination did not terminate");
            }

            assert_eq!(pages, 3);
            assert_eq!(seen.len(), FILM_COUNT);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn page_number_selects_an_offset_page() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/api/v1/films?page[number]=3").await?;
            assert_status(status, StatusCode::OK, "third page");
            let expected: Vec<String> = (20..25).map(film_id).collect();
            assert_eq!(result_field(&body, "id"), expected);
            assert!(body["next"].is_null(), "last page has no token");

            let (_, body) = app
                .get_json("/api/v1/films?page[number]=2&page[size]=20")
                .await?;
            assert_eq!(result_field(&body, "id").len(), 5);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn page_beyond_the_end_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/api/v1/films?page[number]=4").await?;
            assert_status(status, StatusCode::NOT_FOUND, "empty page");
            assert_detail(&body, "films not found");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn rating_sort_breaks_ties_by_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/api/v1/films?sort=-imdb_rating").await?;
            assert_status(status, StatusCode::OK, "sorted films");

            let ids = result_field(&body, "id");
            assert_eq!(ids[..3], [film_id(9), film_id(19), film_id(8)]);
            assert_eq!(body["results"][0]["imdb_rating"], 8.5);

            let (_, body) = app.get_json("/api/v1/films?sort=imdb_rating").await?;
            assert_eq!(result_field(&body, "id")[..3], [film_id(0), film_id(10), film_id(20)]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unsupported_sort_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for sort in ["title", "-title", "imdb_rating,title"] {
                let (status, _) = app.get_json(&format!("/api/v1/films?sort={sort}")).await?;
                assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, sort);
            }
            assert_eq!(app.backend.calls(), 0);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn genre_filter_restricts_results() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .get_json(&format!("/api/v1/films?filter[genre]={GENRE_DRAMA}&page[size]=20"))
                .await?;
            assert_status(status, StatusCode::OK, "drama films");
            assert_eq!(body["count"], 13);
            assert_eq!(result_field(&body, "id")[1], film_id(2));

            let request = app.backend.last_request().expect("search was issued");
            assert_eq!(request.filters.len(), 1);
            assert_eq!(request.filters[0].paths, vec!["genre".to_string()]);

            let (status, body) = app
                .get_json(&format!("/api/v1/films?filter[genre]={GENRE_DOCUMENTARY}"))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "documentaries");
            assert_detail(&body, "films not found");

            let (status, _) = app.get_json("/api/v1/films?filter[genre]=drama").await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "genre must be a uuid");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn search_matches_titles() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/api/v1/films/search?query=star").await?;
            assert_status(status, StatusCode::OK, "search");
            assert_eq!(body["count"], STAR_FILMS as u64);
            assert!(body["next"].is_null());

            let request = app.backend.last_request().expect("search was issued");
            let text = request.text.expect("text search");
            assert_eq!(text.text, "star");
            assert_eq!(text.primary_field.as_deref(), Some("title"));

            let (status, body) = app.get_json("/api/v1/films/search?query=nothing").await?;
            assert_status(status, StatusCode::NOT_FOUND, "no matches");
            assert_detail(&body, "films not found");

            let (status, _) = app.get_json("/api/v1/films/search?query=st").await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "short query");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn details_include_genres_and_people() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .get_json(&format!("/api/v1/films/{}", film_id(0)))
                .await?;
            assert_status(status, StatusCode::OK, "film details");

            assert_eq!(body["id"], film_id(0));
            assert_eq!(body["title"], "Star Film 0");
            assert_eq!(body["description"], "Description of film 0");
            assert_eq!(body["genre"][0]["name"], "Drama");
            assert_eq!(body["directors"][0]["id"], PERSON_LUCAS);
            assert_eq!(body["actors"].as_array().map(Vec::len), Some(1));
            assert_eq!(body["writers"], serde_json::json!([]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_or_malformed_film_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json(&format!("/api/v1/films/{MISSING_ID}")).await?;
            assert_status(status, StatusCode::NOT_FOUND, "missing film");
            assert_detail(&body, "film not found");

            let (status, _) = app.get_json("/api/v1/films/not-a-uuid").await?;
            assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, "malformed id");
            Ok(())
        })
    })
    .await
}
