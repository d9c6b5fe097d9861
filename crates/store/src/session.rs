//! Session token storage.
//!
//! Tokens are opaque random strings handed to the client; only a SHA-256
//! digest is kept at rest. A session is valid while it is present and
//! unexpired. The token proves possession only; the API layer is responsible
//! for scoping every operation to the session's owner.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::info;

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Owner key the session was issued to.
    pub owner: String,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns true if the session has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// In-memory session store keyed by token digest.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    /// Creates a session store issuing tokens valid for `ttl_secs` seconds.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
            sessions: DashMap::new(),
        }
    }

    /// Hashes a token for storage.
    #[must_use]
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Issues a new session token for `owner`.
    ///
    /// Returns the raw token to hand to the client; the store keeps only its
    /// digest.
    #[must_use]
    pub fn issue(&self, owner: &str) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        let token = base64_url::encode(&bytes);

        let session = Session {
            owner: owner.to_string(),
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.insert(Self::hash_token(&token), session);
        info!(owner, "session issued");
        token
    }

    /// Validates a presented token, returning its session if present and
    /// unexpired. Expired sessions are dropped on sight.
    #[must_use]
    pub fn authenticate(&self, token: &str) -> Option<Session> {
        let key = Self::hash_token(token);
        let session = self.sessions.get(&key)?.clone();
        if session.is_expired(Utc::now()) {
            self.sessions.remove(&key);
            return None;
        }
        Some(session)
    }

    /// Revokes a session token.
    pub fn revoke(&self, token: &str) {
        self.sessions.remove(&Self::hash_token(token));
    }
}
