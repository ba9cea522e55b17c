//! Sources of the identity provider's public signing keys.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use http::header::CACHE_CONTROL;
use http::HeaderMap;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{ConfigError, VerificationError};

/// JWK endpoint for Firebase ID token signing keys.
pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Key lifetime used when the response carries no usable `max-age`.
pub const DEFAULT_KEY_TTL: Duration = Duration::from_secs(3600);

/// Timeout for a single key fetch.
pub const KEY_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for obtaining the current set of signing keys.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Return the keys tokens may currently be signed with.
    async fn keys(&self) -> Result<Arc<JwkSet>, VerificationError>;
}

// =============================================================================
// Google
// =============================================================================

struct CachedKeys {
    keys: Arc<JwkSet>,
    expires_at: Instant,
}

/// Fetches signing keys from Google, honouring `Cache-Control: max-age`.
pub struct GoogleKeySource {
    client: reqwest::Client,
    url: String,
    cached: RwLock<Option<CachedKeys>>,
}

impl GoogleKeySource {
    /// Create a source for the Firebase JWK endpoint.
    pub fn new() -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(KEY_FETCH_TIMEOUT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self::with_client(client, GOOGLE_JWKS_URL))
    }

    /// Create a source using a custom client and endpoint.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            cached: RwLock::new(None),
        }
    }

    /// The endpoint keys are fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<CachedKeys, VerificationError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VerificationError::KeyFetch(e.to_string()))?;

        let ttl = max_age(response.headers()).unwrap_or(DEFAULT_KEY_TTL);
        let keys: JwkSet = response
            .json()
            .await
            .map_err(|e| VerificationError::KeyFetch(e.to_string()))?;

        debug!(
            url = %self.url,
            key_count = keys.keys.len(),
            ttl_secs = ttl.as_secs(),
            "Fetched signing keys"
        );

        Ok(CachedKeys {
            keys: Arc::new(keys),
            expires_at: Instant::now() + ttl,
        })
    }
}

#[async_trait]
impl KeySource for GoogleKeySource {
    async fn keys(&self) -> Result<Arc<JwkSet>, VerificationError> {
        {
            let cached = self.cached.read().await;
            if let Some(entry) = cached.as_ref() {
                if entry.expires_at > Instant::now() {
                    return Ok(Arc::clone(&entry.keys));
                }
            }
        }

        let fresh = match self.fetch().await {
            Ok(fresh) => fresh,
            Err(e) => {
                warn!(url = %self.url, "Signing key fetch failed: {}", e);
                return Err(e);
            }
        };
        let keys = Arc::clone(&fresh.keys);
        *self.cached.write().await = Some(fresh);
        Ok(keys)
    }
}

/// Parse the `max-age` directive out of a `Cache-Control` header.
fn max_age(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(CACHE_CONTROL)?.to_str().ok()?;
    value
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

// =============================================================================
// Static
// =============================================================================

/// A fixed key set, for tests and offline use.
#[derive(Clone)]
pub struct StaticKeySource {
    keys: Arc<JwkSet>,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    /// Parse a JWK set document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn keys(&self) -> Result<Arc<JwkSet>, VerificationError> {
        Ok(Arc::clone(&self.keys))
    }
}
