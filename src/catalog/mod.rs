//! Movie catalog: the record type and its flat-file store.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          handlers            │
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │  MovieStore (load / append)  │
//! └──────────────┬───────────────┘
//!                ▼
//!        movies.json (array)
//! ```

mod movie;
mod store;

pub use movie::{
    categories, find_by_name, Movie, CATEGORY_FIELD, NAME_FIELD, POSTER_FIELD, PROPS_FIELD,
    UNKNOWN_CATEGORY,
};
pub use store::MovieStore;
