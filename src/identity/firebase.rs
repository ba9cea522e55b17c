//! Firebase ID token verification.
//!
//! Firebase ID tokens are RS256 JWTs. A token is accepted when:
//!
//! ```text
//! header.alg == RS256, header.kid names a published key
//! signature verifies against that key
//! exp in the future, iat and auth_time not in the future
//! aud == <project_id>
//! iss == https://securetoken.google.com/<project_id>
//! sub non-empty, at most 128 characters
//! ```

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, decode_header, get_current_timestamp, Algorithm, DecodingKey, Validation,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::VerificationError;

use super::keys::KeySource;
use super::{IdentityClaims, IdentityVerifier};

/// Issuer prefix; the project id is appended.
pub const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Allowed clock skew when checking time-based claims.
pub const CLOCK_SKEW_SECS: u64 = 60;

/// Longest subject Firebase will issue.
const MAX_SUBJECT_LEN: usize = 128;

/// Claims read from a Firebase ID token.
#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    iat: Option<u64>,
    #[serde(default)]
    auth_time: Option<u64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Verifies Firebase ID tokens for one project.
pub struct FirebaseVerifier<K: KeySource> {
    project_id: String,
    keys: K,
}

impl<K: KeySource> FirebaseVerifier<K> {
    /// Create a verifier accepting tokens issued for `project_id`.
    pub fn new(project_id: impl Into<String>, keys: K) -> Self {
        Self {
            project_id: project_id.into(),
            keys,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Expected `iss` claim.
    pub fn issuer(&self) -> String {
        format!("{}{}", ISSUER_PREFIX, self.project_id)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = CLOCK_SKEW_SECS;
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[self.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
        validation
    }
}

#[async_trait]
impl<K: KeySource> IdentityVerifier for FirebaseVerifier<K> {
    async fn verify(&self, id_token: &str) -> Result<IdentityClaims, VerificationError> {
        if id_token.is_empty() {
            return Err(VerificationError::MissingToken);
        }

        let header = decode_header(id_token).map_err(jwt_error)?;
        if header.alg != Algorithm::RS256 {
            return Err(VerificationError::Invalid(format!(
                "unexpected algorithm {:?}, expected RS256",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| VerificationError::Malformed("missing \"kid\" header".to_string()))?;

        let keys = self.keys.keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| VerificationError::UnknownKey(kid.clone()))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| VerificationError::KeyFetch(format!("unusable key {}: {}", kid, e)))?;

        let claims = decode::<FirebaseClaims>(id_token, &key, &self.validation())
            .map_err(jwt_error)?
            .claims;

        check_claims(&claims, get_current_timestamp())?;
        debug!(uid = %claims.sub, "Verified ID token");

        Ok(IdentityClaims {
            uid: claims.sub,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// Checks jsonwebtoken does not perform.
fn check_claims(claims: &FirebaseClaims, now: u64) -> Result<(), VerificationError> {
    if claims.sub.is_empty() {
        return Err(VerificationError::InvalidClaims(
            "\"sub\" must be a non-empty string".to_string(),
        ));
    }
    if claims.sub.len() > MAX_SUBJECT_LEN {
        return Err(VerificationError::InvalidClaims(format!(
            "\"sub\" must be at most {} characters",
            MAX_SUBJECT_LEN
        )));
    }

    let latest = now + CLOCK_SKEW_SECS;
    if claims.iat.is_some_and(|iat| iat > latest) {
        return Err(VerificationError::InvalidClaims(
            "token issued in the future".to_string(),
        ));
    }
    if claims.auth_time.is_some_and(|t| t > latest) {
        return Err(VerificationError::InvalidClaims(
            "\"auth_time\" is in the future".to_string(),
        ));
    }
    Ok(())
}

fn jwt_error(err: jsonwebtoken::errors::Error) -> VerificationError {
    match err.kind() {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            VerificationError::Malformed(err.to_string())
        }
        _ => VerificationError::Invalid(err.to_string()),
    }
}
