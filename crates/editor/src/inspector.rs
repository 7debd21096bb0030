//! What the properties panel shows for a selected node.

use serde::Serialize;

use crate::models::{Node, NodeCategory, NodeId};

/// A placeholder configuration field. Values are not stored on the node yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyField {
    Text {
        label: &'static str,
        placeholder: &'static str,
    },
    Select {
        label: &'static str,
        options: Vec<SelectOption>,
        default: &'static str,
    },
    Number {
        label: &'static str,
        placeholder: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub text: &'static str,
}

/// Category-specific fields for the properties panel.
pub fn fields_for(category: NodeCategory) -> Vec<PropertyField> {
    match category {
        NodeCategory::Action => vec![PropertyField::Text {
            label: "Action Configuration",
            placeholder: "Configure action parameters...",
        }],
        NodeCategory::Condition => vec![PropertyField::Select {
            label: "Condition Logic",
            options: vec![
                SelectOption { value: "equals", text: "If field equals value" },
                SelectOption { value: "contains", text: "If field contains text" },
                SelectOption { value: "greater", text: "If field is greater than" },
                SelectOption { value: "less", text: "If field is less than" },
            ],
            default: "equals",
        }],
        NodeCategory::Delay => vec![PropertyField::Number {
            label: "Delay Duration",
            placeholder: "Minutes",
        }],
        _ => Vec::new(),
    }
}

/// Read view of one node for the properties panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInspection {
    pub id: NodeId,
    pub category: NodeCategory,
    pub label: String,
    /// Position rounded to whole canvas units.
    pub position: (i64, i64),
    pub fields: Vec<PropertyField>,
    /// Whether label and fields accept edits in this session.
    pub editable: bool,
}

impl NodeInspection {
    pub fn of(node: &Node, editable: bool) -> Self {
        Self {
            id: node.id.clone(),
            category: node.category,
            label: node.label.clone(),
            position: node.position.rounded(),
            fields: fields_for(node.category),
            editable,
        }
    }
}

/// Workflow stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub connections: usize,
}
