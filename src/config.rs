//! Configuration management for the movie catalog.
//!
//! Settings come from command-line arguments via clap, each with an
//! environment variable fallback and a default. Configuration is parsed once
//! at startup; nothing is re-read while serving.
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 5000)
//! - `MOVIES_DATA_FILE` - Movie collection JSON file (default: LDB/movies.json)
//! - `MOVIES_POSTERS_DIR` - Poster and icon directory (default: LDB/POSTERS)
//! - `MOVIES_TEMPLATES_DIR` - Page templates and static files (default: templates)
//! - `MOVIES_SERVICE_ACCOUNT` - Service account key file (default: serviceAccountKey.json)
//! - `MOVIES_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::path::PathBuf;

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default movie data file.
pub const DEFAULT_DATA_FILE: &str = "LDB/movies.json";

/// Default poster directory.
pub const DEFAULT_POSTERS_DIR: &str = "LDB/POSTERS";

/// Default templates directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default service account key file.
pub const DEFAULT_SERVICE_ACCOUNT: &str = "serviceAccountKey.json";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Movie Catalog - a small movie list server.
///
/// Serves a movie list backed by a JSON file, poster images, and verifies
/// Google sign-in tokens.
#[derive(Parser, Debug, Clone)]
#[command(name = "movie-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Paths
    // =========================================================================
    /// JSON file holding the movie collection.
    ///
    /// Created on the first added movie if it does not exist.
    #[arg(long, default_value = DEFAULT_DATA_FILE, env = "MOVIES_DATA_FILE")]
    pub data_file: PathBuf,

    /// Directory of poster images, also used for icons.
    #[arg(long, default_value = DEFAULT_POSTERS_DIR, env = "MOVIES_POSTERS_DIR")]
    pub posters_dir: PathBuf,

    /// Directory holding index.html, detail.html and static frontend files.
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR, env = "MOVIES_TEMPLATES_DIR")]
    pub templates_dir: PathBuf,

    /// Service account key file used for sign-in verification.
    #[arg(long, default_value = DEFAULT_SERVICE_ACCOUNT, env = "MOVIES_SERVICE_ACCOUNT")]
    pub service_account: PathBuf,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "MOVIES_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host must not be empty. Set --host or HOST".to_string());
        }

        if self.port == 0 {
            return Err("Port must be greater than 0. Set --port or PORT".to_string());
        }

        let paths = [
            ("data_file", &self.data_file),
            ("posters_dir", &self.posters_dir),
            ("templates_dir", &self.templates_dir),
            ("service_account", &self.service_account),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
