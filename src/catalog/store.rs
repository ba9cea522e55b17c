//! Flat-file movie store.
//!
//! The whole collection lives in one JSON array on disk. Every read loads
//! the file from scratch and every write replaces it, so there is no cache
//! to go stale and no locking: two concurrent appends can lose one record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

use super::movie::{self, Movie};

/// Movie collection persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct MovieStore {
    path: PathBuf,
}

impl MovieStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in file order.
    ///
    /// A missing file is an empty collection. A file that is not a JSON
    /// array of objects is a [`StoreError::Parse`].
    pub async fn load_all(&self) -> Result<Vec<Movie>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Data file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Append `record` to the collection and rewrite the file.
    pub async fn append_and_save(&self, record: Movie) -> Result<(), StoreError> {
        let mut movies = self.load_all().await?;
        movies.push(record);
        self.save_all(&movies).await
    }

    /// First record whose `Movie` field equals `name`.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Movie>, StoreError> {
        let movies = self.load_all().await?;
        Ok(movie::find_by_name(&movies, name).cloned())
    }

    /// Overwrite the file with `movies`, two-space indented.
    async fn save_all(&self, movies: &[Movie]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(movies).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })?;

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| self.io_error(source))?;

        debug!(
            path = %self.path.display(),
            count = movies.len(),
            "Saved movie collection"
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
