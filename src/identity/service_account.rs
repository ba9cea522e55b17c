//! Service account credential file.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// The parts of a Google service account key file this server needs.
///
/// The private key is never read: token verification only needs the
/// project id to check the audience and issuer.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,

    #[serde(default)]
    pub client_email: Option<String>,
}

impl ServiceAccount {
    /// Read and parse the credential file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &raw)
    }

    /// Parse credential JSON; `origin` names the source in error messages.
    pub fn from_json(origin: &str, raw: &str) -> Result<Self, ConfigError> {
        let account: ServiceAccount =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
                path: origin.to_string(),
                source,
            })?;

        if account.project_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                path: origin.to_string(),
                field: "project_id",
            });
        }
        Ok(account)
    }
}
