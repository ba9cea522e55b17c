//! Router configuration for the movie catalog.
//!
//! # Route Structure
//!
//! ```text
//! /                        - Movie list page
//! /movie/{name}            - Movie detail page
//! /movies                  - GET all movies / POST a new movie (JSON)
//! /google-login            - ID token verification
//! /POSTERS/{filename}      - Poster images
//! /icon/{filename}         - Icons (served from the posters directory)
//! /static/{path}           - Frontend static files
//! /health                  - Health check
//! ```
//!
//! # Example
//!
//! ```ignore
//! use movie_catalog::server::{create_router, AppState, RouterConfig};
//!
//! let state = AppState::new(store, pages, verifier);
//! let config = RouterConfig::new("LDB/POSTERS").with_static_dir("templates");
//!
//! let router = create_router(state, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::assets::asset_service;
use super::handlers::{
    add_movie_handler, google_login_handler, health_handler, index_handler, list_movies_handler,
    movie_detail_handler, AppState,
};
use crate::identity::IdentityVerifier;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Directory served under `/POSTERS` and `/icon`
    pub posters_dir: PathBuf,

    /// Directory served under `/static` (None = route not mounted)
    pub static_dir: Option<PathBuf>,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration serving posters from `posters_dir`.
    ///
    /// By default no static directory is mounted, CORS allows any origin
    /// and tracing is enabled.
    pub fn new(posters_dir: impl Into<PathBuf>) -> Self {
        Self {
            posters_dir: posters_dir.into(),
            static_dir: None,
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Serve frontend static files from `dir` under `/static`.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router.
pub fn create_router<V>(state: AppState<V>, config: RouterConfig) -> Router
where
    V: IdentityVerifier + 'static,
{
    let cors = build_cors_layer(&config);

    let mut router = Router::new()
        .route("/", get(index_handler::<V>))
        .route("/movie/{name}", get(movie_detail_handler::<V>))
        .route(
            "/movies",
            get(list_movies_handler::<V>).post(add_movie_handler::<V>),
        )
        .route("/google-login", post(google_login_handler::<V>))
        .route("/health", get(health_handler))
        .with_state(state)
        .nest_service("/POSTERS", asset_service(&config.posters_dir))
        .nest_service("/icon", asset_service(&config.posters_dir));

    if let Some(ref static_dir) = config.static_dir {
        router = router.nest_service("/static", asset_service(static_dir));
    }

    let router = router.layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
