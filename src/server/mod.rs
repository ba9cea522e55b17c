//! HTTP server layer for the movie catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐  │
//! │  │  handlers   │  │    pages    │  │  assets   │  │  routes  │  │
//! │  │ (requests)  │  │   (tera)    │  │ (ServeDir)│  │ (router) │  │
//! │  └─────────────┘  └─────────────┘  └───────────┘  └──────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod assets;
pub mod handlers;
pub mod pages;
pub mod routes;

pub use assets::asset_service;
pub use handlers::{
    add_movie_handler, google_login_handler, health_handler, index_handler, list_movies_handler,
    movie_detail_handler, AppState, ErrorResponse, HealthResponse, LoginErrorResponse,
    LoginRequest, LoginResponse, LOGIN_SUCCESS_MESSAGE, MOVIE_NOT_FOUND,
};
pub use pages::{Pages, DETAIL_TEMPLATE, INDEX_TEMPLATE};
pub use routes::{create_router, RouterConfig};
