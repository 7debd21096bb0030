//! Data-transfer types for backend responses.
//!
//! Every response is decoded into one of these before use. A shape
//! mismatch is a [`DecodeError`], never a silently missing field.

use editor::{Connection, DecodeError, GraphSnapshot, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /api/users/me` and the admin user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub is_active: bool,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl UserDto {
    pub fn decode(value: Value) -> Result<Self, DecodeError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A workflow as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDto {
    pub id: String,
    pub name: String,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl WorkflowDto {
    pub fn decode(value: Value) -> Result<Self, DecodeError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Validated graph for opening an editor session.
    pub fn into_snapshot(self) -> Result<GraphSnapshot, DecodeError> {
        GraphSnapshot::new(self.nodes, self.connections).validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_decodes_with_optional_fields_missing() {
        let user = UserDto::decode(json!({
            "id": 7,
            "email": "owner@bizbot.test",
            "username": "owner",
            "roles": ["user"],
            "is_active": true,
            "created_at": "2025-01-01T00:00:00"
        }))
        .unwrap();

        assert_eq!(user.username, "owner");
        assert_eq!(user.company, None);
    }

    #[test]
    fn user_with_wrong_type_is_rejected() {
        let result = UserDto::decode(json!({
            "id": "seven",
            "email": "owner@bizbot.test",
            "username": "owner",
            "is_active": true
        }));
        assert!(matches!(result, Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn workflow_with_duplicate_ids_fails_validation() {
        let node = json!({
            "id": "n", "type": "delay", "label": "Wait", "glyph": "clock",
            "position": { "x": 0.0, "y": 0.0 }, "style": "warning"
        });
        let dto = WorkflowDto::decode(json!({
            "id": "wf-1",
            "name": "Broken",
            "nodes": [node.clone(), node]
        }))
        .unwrap();

        assert!(matches!(dto.into_snapshot(), Err(DecodeError::DuplicateNodeId(_))));
    }
}
