//! Tuning knobs for an editor session.

use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Rendered size of a node box in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeBox {
    pub width: f64,
    pub height: f64,
}

impl NodeBox {
    /// Offset from a node's origin to its connection anchor.
    pub fn anchor_offset(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for NodeBox {
    fn default() -> Self {
        Self {
            width: 150.0,
            height: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Size used for anchor and curve geometry.
    pub node_box: NodeBox,
    /// Where `add_node` drops a node when the caller gives no position.
    pub default_drop_position: Position,
    /// Where the bootstrap trigger node sits.
    pub start_position: Position,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_box: NodeBox::default(),
            default_drop_position: Position::new(400.0, 300.0),
            start_position: Position::new(100.0, 200.0),
        }
    }
}
