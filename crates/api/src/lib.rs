//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for auth, accounts, and ledger operations
//! - Session-token authentication middleware
//! - The `{success, data, message}` response envelope

pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use granary_store::{Directory, Ledger, SessionStore, UserStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account directory (allocation and lookup).
    pub directory: Arc<Directory>,
    /// Ledger application layer.
    pub ledger: Ledger,
    /// User credential store.
    pub users: Arc<UserStore>,
    /// Session token store.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Builds the application state over a fresh set of stores.
    #[must_use]
    pub fn new(directory: Arc<Directory>, sessions: Arc<SessionStore>) -> Self {
        Self {
            ledger: Ledger::new(Arc::clone(&directory)),
            directory,
            users: Arc::new(UserStore::new()),
            sessions,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .merge(routes::health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
