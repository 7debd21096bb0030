//! Route gating by authentication state and role claim.

use chrono::{DateTime, Utc};
use editor::SessionMode;
use tracing::debug;

use crate::auth::{AuthContext, TokenClaims, ADMIN_ROLE};

/// Where a navigation attempt ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// No session, or the session expired (and has been cleared).
    RedirectToLogin,
    /// Signed in, but without the role the route needs.
    RedirectToDashboard,
}

/// Guard for one protected route.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    required_role: Option<String>,
}

impl RouteGuard {
    /// Any signed-in user may pass.
    pub fn signed_in() -> Self {
        Self::default()
    }

    pub fn requiring(role: impl Into<String>) -> Self {
        Self {
            required_role: Some(role.into()),
        }
    }

    pub async fn check(&self, auth: &AuthContext, now: DateTime<Utc>) -> Access {
        let Some(session) = auth.current().await else {
            return Access::RedirectToLogin;
        };

        if session.claims().is_expired(now) {
            debug!(user = %session.claims().sub, "session expired");
            auth.sign_out().await;
            return Access::RedirectToLogin;
        }

        match &self.required_role {
            Some(role) if !session.claims().has_role(role) => Access::RedirectToDashboard,
            _ => Access::Allow,
        }
    }
}

/// Editor mode granted to a user: admins edit, everyone else views.
pub fn editor_mode_for(claims: &TokenClaims) -> SessionMode {
    if claims.has_role(ADMIN_ROLE) {
        SessionMode::Editable
    } else {
        SessionMode::ReadOnly
    }
}
