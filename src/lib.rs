//! Taskboard Server Library
//!
//! Account, authentication and board storage for the taskboard app. All
//! reads and writes go through a [`Repository`], which runs them one at a
//! time over a pluggable key-value store.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;
pub mod security;

pub use config::{Config, StorageDriver};
pub use db::{open_store, KvStore, Store};
pub use error::{AppError, Result};
pub use repo::{Repository, UpdateOutcome};

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given repository and configuration
    pub fn new(repo: Repository, config: Config) -> Self {
        Self { repo, config }
    }
}

/// Build the HTTP router with CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/accounts", post(routes::register_account))
        .route("/api/accounts/verify", post(routes::verify_account))
        .route(
            "/api/accounts/:account_id/boards",
            get(routes::list_boards)
                .post(routes::add_board)
                .delete(routes::purge_boards),
        )
        .route(
            "/api/accounts/:account_id/boards/:board_id",
            put(routes::update_board),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
