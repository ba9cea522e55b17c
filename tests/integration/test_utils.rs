//! Test utilities for integration tests.
//!
//! Provides a mock identity verifier and a [`TestApp`] that wires a router to
//! a temporary data directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use movie_catalog::error::VerificationError;
use movie_catalog::identity::{IdentityClaims, IdentityVerifier};
use movie_catalog::{create_router, AppState, MovieStore, Pages, RouterConfig};

// =============================================================================
// Mock Verifier
// =============================================================================

/// A verifier that accepts a fixed set of tokens.
#[derive(Clone, Default)]
pub struct MockVerifier {
    tokens: HashMap<String, IdentityClaims>,
    calls: Arc<AtomicUsize>,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, claims: IdentityClaims) -> Self {
        self.tokens.insert(token.to_string(), claims);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityVerifier for MockVerifier {
    async fn verify(&self, id_token: &str) -> Result<IdentityClaims, VerificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .get(id_token)
            .cloned()
            .ok_or_else(|| VerificationError::Invalid("token rejected by mock".to_string()))
    }
}

// =============================================================================
// Test App
// =============================================================================

/// Path of the bundled page templates.
pub fn templates_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

/// A router backed by a fresh temporary directory.
pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
}

impl TestApp {
    /// App with an empty collection and a verifier that rejects everything.
    pub fn new() -> Self {
        Self::with_verifier(MockVerifier::new())
    }

    pub fn with_verifier<V: IdentityVerifier + 'static>(verifier: V) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("POSTERS")).unwrap();

        let store = MovieStore::new(dir.path().join("movies.json"));
        let pages = Pages::load(&templates_dir()).unwrap();
        let config = RouterConfig::new(dir.path().join("POSTERS"))
            .with_static_dir(templates_dir())
            .with_tracing(false);
        let router = create_router(AppState::new(store, pages, verifier), config);

        Self { dir, router }
    }

    /// Seed the data file with raw JSON.
    pub fn with_data(self, raw: &str) -> Self {
        std::fs::write(self.data_file(), raw).unwrap();
        self
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("movies.json")
    }

    pub fn posters_dir(&self) -> PathBuf {
        self.dir.path().join("POSTERS")
    }

    pub fn write_poster(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.posters_dir().join(name), bytes).unwrap();
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Bytes) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Bytes) {
        self.post_raw(uri, "application/json", body.to_string()).await
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, Bytes) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }
}

/// Parse a response body as JSON.
pub fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// Read the fixture file under `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}
