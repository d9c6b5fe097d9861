//! Account routes.
//!
//! Every route is scoped to the authenticated session's owner; there is no
//! way to read another pigeon's account through this surface.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::middleware::AuthSession;
use crate::response::{directory_failure, success};
use granary_shared::types::AccountRef;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/me", get(get_my_account))
        .route("/accounts/me/transactions", get(get_my_transactions))
}

/// GET /accounts - List the caller's accounts.
async fn list_accounts(State(state): State<AppState>, session: AuthSession) -> impl IntoResponse {
    let accounts = state.directory.list_accounts(session.owner());
    success(StatusCode::OK, json!({ "accounts": accounts }))
}

/// POST /accounts - Open an additional account for the caller.
///
/// Rejected with `DUPLICATE_OWNER` under the one-account-per-owner policy.
async fn create_account(State(state): State<AppState>, session: AuthSession) -> impl IntoResponse {
    match state.directory.create_account(session.owner()) {
        Ok(account) => {
            info!(owner = session.owner(), account_id = %account.id, "additional account opened");
            success(StatusCode::CREATED, account)
        }
        Err(e) => directory_failure(&e),
    }
}

/// GET /accounts/me - The caller's account snapshot.
async fn get_my_account(State(state): State<AppState>, session: AuthSession) -> impl IntoResponse {
    match state
        .directory
        .resolve(&AccountRef::ByOwner(session.owner().to_string()))
    {
        Ok(account) => success(StatusCode::OK, account),
        Err(e) => directory_failure(&e),
    }
}

/// GET /accounts/me/transactions - The caller's recent history (at most 10
/// entries, oldest first).
async fn get_my_transactions(
    State(state): State<AppState>,
    session: AuthSession,
) -> impl IntoResponse {
    match state
        .directory
        .resolve(&AccountRef::ByOwner(session.owner().to_string()))
    {
        Ok(account) => success(StatusCode::OK, json!({ "transactions": account.history() })),
        Err(e) => directory_failure(&e),
    }
}
