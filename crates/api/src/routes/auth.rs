//! Authentication routes for register, login, and logout.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::middleware::AuthSession;
use crate::response::{directory_failure, failure, success, user_failure};
use granary_core::auth::{hash_password, verify_password};
use granary_shared::types::AccountRef;

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Creates the auth routes that require an authenticated session.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/logout", post(logout))
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username; doubles as the account owner key.
    pub username: String,
    /// Plain-text password, hashed before it is stored.
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// POST /auth/register - Register a new pigeon and open its account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return failure(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Username and password cannot be empty",
        );
    }
    // References are disambiguated by shape, so a username must not collide
    // with the account-id or card-number patterns.
    if !matches!(AccountRef::parse(username), AccountRef::ByOwner(_)) {
        return failure(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Username cannot look like an account id or card number",
        );
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "failed to hash password during registration");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An error occurred during registration",
            );
        }
    };

    if let Err(e) = state.users.register(username, password_hash) {
        return user_failure(&e);
    }

    match state.directory.create_account(username) {
        Ok(account) => {
            info!(username, account_id = %account.id, "pigeon registered");
            success(StatusCode::CREATED, account)
        }
        Err(e) => directory_failure(&e),
    }
}

/// POST /auth/login - Verify credentials and issue a session token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let Some(user) = state.users.find(payload.username.trim()) else {
        info!(username = %payload.username, "login attempt for unknown username");
        return failure(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid username or password",
        );
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(username = %user.username, "failed login attempt");
            return failure(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password",
            );
        }
        Err(e) => {
            error!(error = %e, "password verification error");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An error occurred during login",
            );
        }
    }

    let account = match state
        .directory
        .resolve(&AccountRef::ByOwner(user.username.clone()))
    {
        Ok(account) => account,
        Err(e) => return directory_failure(&e),
    };

    let token = state.sessions.issue(&user.username);
    info!(username = %user.username, "pigeon logged in");

    success(
        StatusCode::OK,
        json!({
            "token": token,
            "account": account,
        }),
    )
}

/// POST /auth/logout - Revoke the presented session token.
async fn logout(
    State(state): State<AppState>,
    session: AuthSession,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
    {
        state.sessions.revoke(token);
    }
    info!(owner = session.owner(), "pigeon logged out");
    success(StatusCode::OK, json!({}))
}
