//! Identity verification.
//!
//! The login route hands an opaque ID token to an [`IdentityVerifier`] and
//! relays whatever comes back. The production verifier checks Firebase ID
//! tokens against Google's published signing keys:
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │   FirebaseVerifier   │─────▶│      KeySource       │
//! │ (JWT + claim checks) │      │ Google JWKS / static │
//! └──────────────────────┘      └──────────────────────┘
//! ```

mod firebase;
mod keys;
mod service_account;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::VerificationError;

pub use firebase::{FirebaseVerifier, CLOCK_SKEW_SECS, ISSUER_PREFIX};
pub use keys::{
    GoogleKeySource, KeySource, StaticKeySource, DEFAULT_KEY_TTL, GOOGLE_JWKS_URL,
    KEY_FETCH_TIMEOUT,
};
pub use service_account::ServiceAccount;

/// Identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityClaims {
    /// Subject identifier
    pub uid: String,

    pub email: Option<String>,

    /// Display name
    pub name: Option<String>,
}

/// Trait for verifying identity tokens.
///
/// This abstraction keeps the HTTP layer independent of the identity
/// provider, so handlers can be exercised with a mock verifier.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `id_token` and return the identity it carries.
    async fn verify(&self, id_token: &str) -> Result<IdentityClaims, VerificationError>;
}
