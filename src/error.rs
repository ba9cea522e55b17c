use thiserror::Error;

/// Errors raised while reading or writing the movie data file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but is not a JSON array of movie objects
    #[error("Malformed movie data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by an identity verifier.
///
/// The login handler flattens every variant into the same 400 response;
/// the variants exist for logging and tests.
#[derive(Debug, Clone, Error)]
pub enum VerificationError {
    /// No token was supplied
    #[error("No ID token provided")]
    MissingToken,

    /// The token is not a structurally valid JWT
    #[error("Malformed ID token: {0}")]
    Malformed(String),

    /// The token's `kid` does not match any published signing key
    #[error("ID token has no matching signing key (kid: {0})")]
    UnknownKey(String),

    /// Signature, expiry, audience or issuer check failed
    #[error("Invalid ID token: {0}")]
    Invalid(String),

    /// The token verified but its claims are unusable
    #[error("Invalid ID token claims: {0}")]
    InvalidClaims(String),

    /// The signing keys could not be fetched from the identity service
    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(String),
}

/// Errors raised while loading startup configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential file could not be read
    #[error("Cannot read service account file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The credential file is not valid service account JSON
    #[error("Invalid service account file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required field is empty
    #[error("Service account file {path} has an empty {field}")]
    MissingField { path: String, field: &'static str },

    /// The frontend templates failed to load
    #[error("Failed to load templates from {dir}: {message}")]
    Templates { dir: String, message: String },

    /// The HTTP client used for key fetching could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors raised while rendering an HTML page
#[derive(Debug, Error)]
pub enum PageError {
    /// The movie collection could not be loaded
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The template failed to render
    #[error("Template error: {0}")]
    Render(String),
}
