//! Static file serving for posters, icons and frontend assets.

use std::path::Path;

use tower_http::services::ServeDir;

/// Serve files from `dir` by name.
///
/// The content type is guessed from the file extension. Missing files and
/// paths that try to escape `dir` get a 404; directories are never listed.
pub fn asset_service(dir: impl AsRef<Path>) -> ServeDir {
    ServeDir::new(dir).append_index_html_on_directories(false)
}
