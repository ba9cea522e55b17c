//! # Movie Catalog
//!
//! A small movie catalog web server.
//!
//! The collection lives in a single JSON file that is read on every request
//! and rewritten on every add. Pages are rendered from Tera templates, poster
//! images are served straight from a directory, and Google sign-in tokens are
//! verified against Firebase's published signing keys.
//!
//! ## Architecture
//!
//! - [`catalog`] - Movie record type and the flat-file store
//! - [`identity`] - ID token verification
//! - [`server`] - Axum routes, handlers, pages and static assets
//! - [`config`] - CLI and environment configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use movie_catalog::{
//!     create_router, AppState, FirebaseVerifier, GoogleKeySource, MovieStore, Pages,
//!     RouterConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MovieStore::new("LDB/movies.json");
//!     let pages = Pages::load(Path::new("templates")).unwrap();
//!     let verifier = FirebaseVerifier::new("my-project", GoogleKeySource::new().unwrap());
//!
//!     let router = create_router(
//!         AppState::new(store, pages, verifier),
//!         RouterConfig::new("LDB/POSTERS").with_static_dir("templates"),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod server;

// Re-export commonly used types
pub use catalog::{categories, find_by_name, Movie, MovieStore, UNKNOWN_CATEGORY};
pub use config::Config;
pub use error::{ConfigError, PageError, StoreError, VerificationError};
pub use identity::{
    FirebaseVerifier, GoogleKeySource, IdentityClaims, IdentityVerifier, KeySource,
    ServiceAccount, StaticKeySource,
};
pub use server::{
    asset_service, create_router, health_handler, AppState, ErrorResponse, HealthResponse,
    LoginErrorResponse, LoginRequest, LoginResponse, Pages, RouterConfig,
};
