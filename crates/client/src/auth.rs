//! Credentials held for the lifetime of a signed-in session.
//!
//! An [`AuthContext`] is created once at application start and passed to
//! everything that needs credentials. `sign_in` fills it, `sign_out` (or a
//! 401 from the backend) empties it.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use editor::DecodeError;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Role that grants full editing rights.
pub const ADMIN_ROLE: &str = "admin";

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the user's email).
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token whose expiry cannot be represented counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |exp| exp < now)
    }
}

/// A bearer token plus its decoded claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
    claims: TokenClaims,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, claims: TokenClaims) -> Self {
        Self {
            token: token.into(),
            claims,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }
}

/// Shared, explicitly-owned slot for the current [`AuthSession`].
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sign_in(&self, session: AuthSession) {
        info!(user = %session.claims.sub, "signed in");
        *self.inner.write().await = Some(session);
    }

    /// Drop the held session. Returns whether there was one.
    pub async fn sign_out(&self) -> bool {
        let previous = self.inner.write().await.take();
        if let Some(session) = &previous {
            info!(user = %session.claims.sub, "signed out");
        }
        previous.is_some()
    }

    pub async fn current(&self) -> Option<AuthSession> {
        self.inner.read().await.clone()
    }

    pub async fn bearer_token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.token.clone())
    }
}
