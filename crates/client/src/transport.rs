//! Generic request/response boundary and the authenticated client on top.
//!
//! The actual HTTP stack is the host's business: it implements [`Transport`].
//! [`ApiClient`] adds what every call needs: the bearer header on the way
//! out, and session teardown when the backend answers 401.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::AuthContext;
use crate::dto::{UserDto, WorkflowDto};
use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

pub struct ApiClient<T> {
    transport: T,
    auth: AuthContext,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, auth: AuthContext) -> Self {
        Self { transport, auth }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Send an authenticated request and return the JSON body.
    ///
    /// # Errors
    /// - [`ClientError::NotAuthenticated`] if no session is held.
    /// - [`ClientError::Unauthorized`] on 401; the session is cleared first.
    /// - [`ClientError::Status`] for any other non-2xx status.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Value, ClientError> {
        let token = self
            .auth
            .bearer_token()
            .await
            .ok_or(ClientError::NotAuthenticated)?;
        request
            .headers
            .push(("Authorization".into(), format!("Bearer {token}")));

        debug!(method = ?request.method, path = %request.path, "api request");
        let response = self.transport.send(request).await?;

        match response.status {
            401 => {
                warn!("credentials rejected, signing out");
                self.auth.sign_out().await;
                Err(ClientError::Unauthorized)
            }
            _ if response.is_success() => Ok(response.body),
            status => Err(ClientError::Status {
                status,
                body: response.body,
            }),
        }
    }

    pub async fn current_user(&self) -> Result<UserDto, ClientError> {
        let body = self.send(ApiRequest::new(Method::Get, "/api/users/me")).await?;
        Ok(UserDto::decode(body)?)
    }

    pub async fn list_users(&self) -> Result<Vec<UserDto>, ClientError> {
        let body = self.send(ApiRequest::new(Method::Get, "/api/users/")).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Load a stored workflow for opening in the editor.
    pub async fn fetch_workflow(&self, id: &str) -> Result<WorkflowDto, ClientError> {
        let body = self
            .send(ApiRequest::new(Method::Get, format!("/api/workflows/{id}")))
            .await?;
        Ok(WorkflowDto::decode(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthSession, TokenClaims};
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays canned responses and records what was sent.
    struct CannedTransport {
        responses: Mutex<Vec<ApiResponse>>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl CannedTransport {
        fn new(responses: Vec<ApiResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
            self.seen.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ClientError::Transport("no canned response".into()))
        }
    }

    async fn signed_in_client(responses: Vec<ApiResponse>) -> ApiClient<CannedTransport> {
        let auth = AuthContext::new();
        let claims = TokenClaims { sub: "a@b.c".into(), roles: vec!["admin".into()], exp: 4_000_000_000 };
        auth.sign_in(AuthSession::new("secret", claims)).await;
        ApiClient::new(CannedTransport::new(responses), auth)
    }

    #[tokio::test]
    async fn attaches_bearer_token() {
        let client = signed_in_client(vec![ApiResponse {
            status: 200,
            body: json!({ "id": 1, "email": "a@b.c", "username": "a", "is_active": true }),
        }])
        .await;

        let user = client.current_user().await.unwrap();
        assert_eq!(user.id, 1);

        let seen = client.transport.seen.lock().unwrap();
        assert_eq!(seen[0].header("authorization"), Some("Bearer secret"));
        assert_eq!(seen[0].path, "/api/users/me");
    }

    #[tokio::test]
    async fn unauthorized_clears_session() {
        let client = signed_in_client(vec![ApiResponse { status: 401, body: Value::Null }]).await;

        assert!(matches!(client.current_user().await, Err(ClientError::Unauthorized)));
        assert!(client.auth().current().await.is_none());
        assert!(matches!(client.current_user().await, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn other_failures_keep_session() {
        let client = signed_in_client(vec![ApiResponse { status: 500, body: json!("boom") }]).await;

        assert!(matches!(client.list_users().await, Err(ClientError::Status { status: 500, .. })));
        assert!(client.auth().current().await.is_some());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let client = signed_in_client(vec![ApiResponse { status: 200, body: json!({ "id": 1 }) }]).await;
        assert!(matches!(client.current_user().await, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn fetched_workflow_opens_as_snapshot() {
        let client = signed_in_client(vec![ApiResponse {
            status: 200,
            body: json!({
                "id": "wf-9",
                "name": "Leads",
                "nodes": [{
                    "id": "start", "type": "trigger", "label": "New Lead", "glyph": "zap",
                    "position": { "x": 100.0, "y": 200.0 }, "style": "primary"
                }],
                "connections": []
            }),
        }])
        .await;

        let snapshot = client.fetch_workflow("wf-9").await.unwrap().into_snapshot().unwrap();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(client.transport.seen.lock().unwrap()[0].path, "/api/workflows/wf-9");
    }
}
