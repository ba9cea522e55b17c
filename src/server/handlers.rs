//! HTTP request handlers for the movie catalog.
//!
//! # Endpoints
//!
//! - `GET /` - Movie list page
//! - `GET /movie/{name}` - Movie detail page
//! - `GET /movies` - All movies as JSON
//! - `POST /movies` - Append a movie
//! - `POST /google-login` - Verify a Google/Firebase ID token
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::catalog::{categories, Movie, MovieStore};
use crate::error::{PageError, StoreError, VerificationError};
use crate::identity::{IdentityClaims, IdentityVerifier};

use super::pages::Pages;

/// Body of the 404 returned for an unknown movie name.
pub const MOVIE_NOT_FOUND: &str = "Movie not found";

/// Message returned on a successful sign-in.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Google sign-in successful";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// Built once at startup and handed to every handler via Axum's State
/// extractor. Nothing in here caches movie data.
pub struct AppState<V: IdentityVerifier> {
    /// Flat-file movie store
    pub store: Arc<MovieStore>,

    /// Compiled page templates
    pub pages: Arc<Pages>,

    /// Identity token verifier
    pub verifier: Arc<V>,
}

impl<V: IdentityVerifier> AppState<V> {
    pub fn new(store: MovieStore, pages: Pages, verifier: V) -> Self {
        Self {
            store: Arc::new(store),
            pages: Arc::new(pages),
            verifier: Arc::new(verifier),
        }
    }
}

impl<V: IdentityVerifier> Clone for AppState<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            pages: Arc::clone(&self.pages),
            verifier: Arc::clone(&self.verifier),
        }
    }
}

// =============================================================================
// Request and Response Types
// =============================================================================

/// Body of `POST /google-login`.
///
/// `idToken` is kept as a raw JSON value so a wrongly typed token is
/// reported as a verification failure rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "idToken", default)]
    pub id_token: Option<Value>,
}

impl LoginRequest {
    /// The token string, if one was sent.
    pub fn token(&self) -> Result<&str, VerificationError> {
        match &self.id_token {
            None | Some(Value::Null) => Err(VerificationError::MissingToken),
            Some(Value::String(token)) if token.is_empty() => Err(VerificationError::MissingToken),
            Some(Value::String(token)) => Ok(token.as_str()),
            Some(other) => Err(VerificationError::Malformed(format!(
                "idToken must be a string, got {}",
                other
            ))),
        }
    }
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<IdentityClaims> for LoginResponse {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            msg: LOGIN_SUCCESS_MESSAGE.to_string(),
            uid: claims.uid,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Failed sign-in response: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct LoginErrorResponse {
    pub error: String,
}

/// JSON error response for server-side failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "storage_error", "template_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Store failures are never the client's fault: always 500.
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let error_type = match &self {
            StoreError::Io { .. } => "storage_error",
            StoreError::Parse { .. } => "parse_error",
        };
        server_error(error_type, self.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Store(e) => e.into_response(),
            PageError::Render(message) => server_error("template_error", message),
        }
    }
}

/// Every verification failure becomes the same 400 shape.
impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(status = 400, "Sign-in rejected: {}", message);
        (
            StatusCode::BAD_REQUEST,
            Json(LoginErrorResponse { error: message }),
        )
            .into_response()
    }
}

fn server_error(error_type: &'static str, message: String) -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    error!(
        error_type = error_type,
        status = status.as_u16(),
        "Server error: {}",
        message
    );
    let body = ErrorResponse::with_status(error_type, message, status);
    (status, Json(body)).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the movie list with its category filter.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler<V: IdentityVerifier>(
    State(state): State<AppState<V>>,
) -> Result<Html<String>, PageError> {
    let movies = state.store.load_all().await?;
    let categories = categories(&movies);
    let body = state.pages.render_index(&movies, &categories)?;
    Ok(Html(body))
}

/// Render the detail page of the first movie named `name`.
///
/// # Endpoint
///
/// `GET /movie/{name}`
///
/// # Response
///
/// - `200 OK`: HTML detail page
/// - `404 Not Found`: plain text `Movie not found`
pub async fn movie_detail_handler<V: IdentityVerifier>(
    State(state): State<AppState<V>>,
    Path(name): Path<String>,
) -> Result<Response, PageError> {
    match state.store.find_by_name(&name).await? {
        Some(movie) => {
            let body = state.pages.render_detail(&movie)?;
            Ok(Html(body).into_response())
        }
        None => {
            debug!(name = %name, "Movie not found");
            Ok((StatusCode::NOT_FOUND, MOVIE_NOT_FOUND).into_response())
        }
    }
}

/// Return every movie record.
///
/// # Endpoint
///
/// `GET /movies`
pub async fn list_movies_handler<V: IdentityVerifier>(
    State(state): State<AppState<V>>,
) -> Result<Json<Vec<Movie>>, StoreError> {
    Ok(Json(state.store.load_all().await?))
}

/// Append a movie record and echo it back.
///
/// Any JSON object is accepted; no fields are required.
///
/// # Endpoint
///
/// `POST /movies`
///
/// # Response
///
/// `201 Created` with the record as submitted.
pub async fn add_movie_handler<V: IdentityVerifier>(
    State(state): State<AppState<V>>,
    Json(movie): Json<Movie>,
) -> Result<(StatusCode, Json<Movie>), StoreError> {
    state.store.append_and_save(movie.clone()).await?;
    info!(name = ?movie.name(), category = movie.category(), "Added movie");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Verify a Google sign-in ID token.
///
/// # Endpoint
///
/// `POST /google-login`
///
/// # Request
///
/// ```json
/// { "idToken": "<jwt>" }
/// ```
///
/// # Response
///
/// - `200 OK`: `{"msg", "uid", "email", "name"}`
/// - `400 Bad Request`: `{"error": "<message>"}` for any verification failure
pub async fn google_login_handler<V: IdentityVerifier>(
    State(state): State<AppState<V>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, VerificationError> {
    let token = request.token()?;

    let claims = state.verifier.verify(token).await?;
    info!(uid = %claims.uid, "Google sign-in verified");
    Ok(Json(LoginResponse::from(claims)))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
