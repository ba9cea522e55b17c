//! Movie API and page integration tests.
//!
//! Tests verify:
//! - JSON list/add round trips through the data file
//! - Detail lookup (first match, 404 text)
//! - Index page rendering with derived categories
//! - Failure modes for malformed data and request bodies

use axum::http::StatusCode;
use serde_json::json;

use movie_catalog::MovieStore;

use super::test_utils::{json, TestApp};

const SEED: &str = r#"[
  {"Movie": "Heat", "PROP": {"CATEGORY": "Drama"}, "POSTER": "heat.jpg"},
  {"Movie": "Alien", "PROP": {"CATEGORY": "Action"}},
  {"Movie": "Heat", "PROP": {"CATEGORY": "Remake"}},
  {"Movie": "Ronin", "PROP": {"CATEGORY": "Drama"}, "YEAR": 1998}
]"#;

// =============================================================================
// GET /movies
// =============================================================================

#[tokio::test]
async fn test_list_movies_empty_when_file_missing() {
    let app = TestApp::new();
    let (status, body) = app.get("/movies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!([]));
}

#[tokio::test]
async fn test_list_movies_returns_file_contents_in_order() {
    let app = TestApp::new().with_data(SEED);
    let (status, body) = app.get("/movies").await;

    assert_eq!(status, StatusCode::OK);
    let expected: serde_json::Value = serde_json::from_str(SEED).unwrap();
    assert_eq!(json(&body), expected);
}

#[tokio::test]
async fn test_list_movies_malformed_file_is_server_error() {
    let app = TestApp::new().with_data("[{\"Movie\": ");
    let (status, body) = app.get("/movies").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["error"], "parse_error");
}

// =============================================================================
// POST /movies
// =============================================================================

#[tokio::test]
async fn test_add_movie_echoes_and_persists() {
    let app = TestApp::new().with_data(SEED);
    let movie = json!({"Movie": "X", "PROP": {"CATEGORY": "Horror"}});

    let (status, body) = app.post_json("/movies", &movie).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body), movie);

    let (_, body) = app.get("/movies").await;
    let movies = json(&body);
    let movies = movies.as_array().unwrap();
    assert_eq!(movies.len(), 5);
    assert_eq!(movies.last().unwrap(), &movie);
    assert_eq!(movies[0]["Movie"], "Heat");
}

#[tokio::test]
async fn test_add_movie_creates_data_file() {
    let app = TestApp::new();
    assert!(!app.data_file().exists());

    let movie = json!({"Movie": "First", "PROP": {"CATEGORY": "Drama"}, "RATING": 8.1});
    let (status, _) = app.post_json("/movies", &movie).await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = MovieStore::new(app.data_file()).load_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(serde_json::to_value(&stored[0]).unwrap(), movie);
}

#[tokio::test]
async fn test_add_movie_accepts_arbitrary_object() {
    let app = TestApp::new();
    let (status, body) = app.post_json("/movies", &json!({"anything": [1, 2]})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body), json!({"anything": [1, 2]}));
}

#[tokio::test]
async fn test_add_movie_rejects_non_object() {
    let app = TestApp::new();
    let (status, _) = app.post_json("/movies", &json!(["not", "an", "object"])).await;

    assert!(status.is_client_error());
    assert!(!app.data_file().exists());
}

#[tokio::test]
async fn test_add_movie_rejects_invalid_json() {
    let app = TestApp::new();
    let (status, _) = app
        .post_raw("/movies", "application/json", "{not json")
        .await;

    assert!(status.is_client_error());
    assert!(!app.data_file().exists());
}

#[tokio::test]
async fn test_add_movie_on_malformed_file_fails() {
    let app = TestApp::new().with_data("garbage");
    let (status, _) = app
        .post_json("/movies", &json!({"Movie": "X"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(std::fs::read_to_string(app.data_file()).unwrap(), "garbage");
}

// =============================================================================
// GET /movie/{name}
// =============================================================================

#[tokio::test]
async fn test_detail_first_match_wins() {
    let app = TestApp::new().with_data(SEED);
    let (status, body) = app.get("/movie/Heat").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Drama"));
    assert!(!html.contains("Remake"));
}

#[tokio::test]
async fn test_detail_shows_extra_fields() {
    let app = TestApp::new().with_data(SEED);
    let (status, body) = app.get("/movie/Ronin").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("YEAR"));
    assert!(html.contains("1998"));
}

#[tokio::test]
async fn test_detail_percent_encoded_name() {
    let app = TestApp::new().with_data(r#"[{"Movie": "Pulp Fiction", "PROP": {"CATEGORY": "Crime"}}]"#);
    let (status, body) = app.get("/movie/Pulp%20Fiction").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body.to_vec()).unwrap().contains("Crime"));
}

#[tokio::test]
async fn test_detail_not_found() {
    let app = TestApp::new().with_data(SEED);
    let (status, body) = app.get("/movie/Solaris").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(&body[..], b"Movie not found");
}

#[tokio::test]
async fn test_detail_not_found_without_data_file() {
    let app = TestApp::new();
    let (status, body) = app.get("/movie/Heat").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(&body[..], b"Movie not found");
}

// =============================================================================
// GET /
// =============================================================================

#[tokio::test]
async fn test_index_lists_movies_and_sorted_categories() {
    let app = TestApp::new().with_data(SEED);
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Alien"));
    assert!(html.contains("Ronin"));

    let action = html.find("data-category=\"Action\">Action").unwrap();
    let drama = html.find("data-category=\"Drama\">Drama").unwrap();
    let remake = html.find("data-category=\"Remake\">Remake").unwrap();
    assert!(action < drama && drama < remake);
    assert_eq!(html.matches("data-category=\"Drama\">Drama").count(), 1);
}

#[tokio::test]
async fn test_index_unknown_category() {
    let app = TestApp::new().with_data(r#"[{"Movie": "Mystery", "PROP": {}}]"#);
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("data-category=\"Unknown\">Unknown"));
}

#[tokio::test]
async fn test_index_survives_non_string_fields() {
    let app = TestApp::new().with_data(SEED);
    let (status, _) = app
        .post_json("/movies", &json!({"Movie": 5, "PROP": {"CATEGORY": "X"}}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    app.post_json("/movies", &json!({"Movie": "Brazil", "POSTER": 7}))
        .await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Brazil"));
    assert!(html.contains("<span class=\"title\">5</span>"));

    let (status, _) = app.get("/movie/Brazil").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_index_card_category_matches_filter() {
    let app = TestApp::new().with_data(r#"[{"Movie": "Odd", "PROP": {"CATEGORY": 3}}]"#);
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("data-category=\"Unknown\">Unknown"));
    assert!(html.contains("href=\"/movie/Odd\" data-category=\"Unknown\""));
    assert!(!html.contains("data-category=\"3\""));
}

#[tokio::test]
async fn test_index_empty_collection() {
    let app = TestApp::new();
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body.to_vec())
        .unwrap()
        .contains("No movies yet."));
}

#[tokio::test]
async fn test_index_malformed_file_is_server_error() {
    let app = TestApp::new().with_data("{}");
    let (status, _) = app.get("/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_index_reflects_added_movie() {
    let app = TestApp::new().with_data(SEED);
    app.post_json("/movies", &json!({"Movie": "Zodiac", "PROP": {"CATEGORY": "Thriller"}}))
        .await;

    let (_, body) = app.get("/").await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Zodiac"));
    assert!(html.contains("data-category=\"Thriller\">Thriller"));
}

// =============================================================================
// GET /health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "healthy");
}
