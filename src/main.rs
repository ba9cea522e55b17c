//! Movie Catalog - a small movie list server.
//!
//! This binary loads configuration, credentials and templates, then starts
//! the HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_catalog::{
    config::Config,
    identity::{FirebaseVerifier, GoogleKeySource, ServiceAccount},
    server::{create_router, AppState, Pages, RouterConfig},
    MovieStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Movie Catalog v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Data file: {}", config.data_file.display());
    info!("  Posters: {}", config.posters_dir.display());
    info!("  Templates: {}", config.templates_dir.display());
    info!("  Service account: {}", config.service_account.display());

    if !config.data_file.exists() {
        warn!(
            "  Data file does not exist yet; it will be created on the first added movie"
        );
    }
    if !config.posters_dir.is_dir() {
        warn!("  Posters directory not found; poster and icon requests will 404");
    }

    // Credentials are required: without them sign-in cannot be verified.
    let account = match ServiceAccount::load(&config.service_account) {
        Ok(account) => account,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("  Firebase project: {}", account.project_id);
    if let Some(ref email) = account.client_email {
        info!("  Service account: {}", email);
    }

    let keys = match GoogleKeySource::new() {
        Ok(keys) => keys,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let verifier = FirebaseVerifier::new(account.project_id, keys);

    let pages = match Pages::load(&config.templates_dir) {
        Ok(pages) => pages,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = MovieStore::new(config.data_file.clone());
    let state = AppState::new(store, pages, verifier);
    let router = create_router(state, build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("    curl http://{}/movies", addr);
    info!("");

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "movie_catalog=debug,tower_http=debug"
    } else {
        "movie_catalog=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new(config.posters_dir.clone())
        .with_static_dir(config.templates_dir.clone())
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
