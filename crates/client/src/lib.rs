//! `client` crate: the authenticated boundary around the editor.
//!
//! Holds credentials for a signed-in session, gates routes by role, picks
//! the editor mode for a user, and decodes backend responses into typed
//! DTOs. Token issuance and the HTTP stack itself are external.

pub mod access;
pub mod auth;
pub mod dto;
pub mod error;
pub mod transport;

pub use access::{editor_mode_for, Access, RouteGuard};
pub use auth::{AuthContext, AuthSession, TokenClaims, ADMIN_ROLE};
pub use dto::{UserDto, WorkflowDto};
pub use error::ClientError;
pub use transport::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
