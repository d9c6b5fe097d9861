//! Authentication middleware for protected routes.
//!
//! Sessions are opaque bearer tokens checked for presence and expiry against
//! the session store. The middleware only establishes *who* is calling; each
//! handler scopes its work to the session's owner, so a pigeon can only ever
//! operate on its own accounts.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use granary_store::Session;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates session tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token against the session store (presence + expiry)
/// 3. Stores the session in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "code": "MISSING_TOKEN",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    match state.sessions.authenticate(token) {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "code": "INVALID_TOKEN",
                "message": "Invalid or expired session token"
            })),
        )
            .into_response(),
    }
}

/// Extractor for the authenticated session.
///
/// Use this in handlers to get the calling pigeon's owner key:
///
/// ```ignore
/// async fn handler(session: AuthSession) -> impl IntoResponse {
///     let owner = session.owner();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl AuthSession {
    /// Returns the owner key the session was issued to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.0.owner
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthSession)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "success": false,
                        "code": "UNAUTHORIZED",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}
