//! HTML page rendering with Tera templates.

use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::catalog::Movie;
use crate::error::{ConfigError, PageError};

/// Template for the movie list.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Template for a single movie.
pub const DETAIL_TEMPLATE: &str = "detail.html";

/// Template view of one record on the movie list.
///
/// Fields are derived in Rust so that records with non-string values still
/// render.
#[derive(Debug, Serialize)]
struct MovieCard<'a> {
    /// Detail lookup name; `None` when the record cannot be linked.
    name: Option<&'a str>,
    title: String,
    category: &'a str,
    poster: Option<&'a str>,
}

impl<'a> From<&'a Movie> for MovieCard<'a> {
    fn from(movie: &'a Movie) -> Self {
        Self {
            name: movie.name(),
            title: movie.title(),
            category: movie.category(),
            poster: movie.poster(),
        }
    }
}

/// Compiled page templates.
pub struct Pages {
    tera: Tera,
}

impl Pages {
    /// Load every `*.html` template under `dir`.
    ///
    /// Fails if a template does not parse or if either page template is
    /// missing.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let glob = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&glob).map_err(|e| ConfigError::Templates {
            dir: dir.display().to_string(),
            message: error_chain(&e),
        })?;

        let pages = Self::from_tera(tera).map_err(|message| ConfigError::Templates {
            dir: dir.display().to_string(),
            message,
        })?;
        debug!(dir = %dir.display(), "Loaded page templates");
        Ok(pages)
    }

    /// Wrap an already populated Tera instance.
    pub fn from_tera(tera: Tera) -> Result<Self, String> {
        let names: Vec<&str> = tera.get_template_names().collect();
        for required in [INDEX_TEMPLATE, DETAIL_TEMPLATE] {
            if !names.contains(&required) {
                return Err(format!("missing template {}", required));
            }
        }
        Ok(Self { tera })
    }

    /// Render the movie list page.
    pub fn render_index(&self, movies: &[Movie], categories: &[String]) -> Result<String, PageError> {
        let cards: Vec<MovieCard<'_>> = movies.iter().map(MovieCard::from).collect();
        let mut ctx = Context::new();
        ctx.insert("movies", &cards);
        ctx.insert("categories", categories);
        self.render(INDEX_TEMPLATE, &ctx)
    }

    /// Render the detail page for one movie.
    pub fn render_detail(&self, movie: &Movie) -> Result<String, PageError> {
        let mut ctx = Context::new();
        ctx.insert("movie", movie);
        ctx.insert("title", &movie.title());
        ctx.insert("category", movie.category());
        ctx.insert("poster", &movie.poster());
        self.render(DETAIL_TEMPLATE, &ctx)
    }

    fn render(&self, template: &str, ctx: &Context) -> Result<String, PageError> {
        self.tera
            .render(template, ctx)
            .map_err(|e| PageError::Render(error_chain(&e)))
    }
}

/// Tera reports the useful part of an error in its source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
