//! Ephemeral interaction state: selection plus at most one active gesture.
//!
//! ```text
//!   Idle ──begin_drag──▶ Dragging ──end_drag──▶ Idle
//!   Idle ──begin_connection──▶ Connecting ──complete / cancel──▶ Idle
//! ```
//!
//! Starting either gesture first clears whatever gesture was active, so the
//! two are mutually exclusive.

use crate::models::{NodeId, Position};

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        node: NodeId,
        /// Pointer position relative to the node origin when the drag began.
        offset: Position,
    },
    Connecting {
        source: NodeId,
        /// Last pointer position, for the preview line. `None` until the
        /// pointer first moves.
        pointer: Option<Position>,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Whether the gesture names `node`.
    pub fn references(&self, node: &NodeId) -> bool {
        match self {
            Gesture::Idle => false,
            Gesture::Dragging { node: n, .. } => n == node,
            Gesture::Connecting { source, .. } => source == node,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    selected: Option<NodeId>,
    gesture: Gesture,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node;
    }

    /// Enter `Dragging`, cancelling any other gesture, and select the node.
    pub fn begin_drag(&mut self, node: NodeId, offset: Position) {
        self.selected = Some(node.clone());
        self.gesture = Gesture::Dragging { node, offset };
    }

    /// The node being dragged and its grab offset, if dragging.
    pub fn drag(&self) -> Option<(&NodeId, Position)> {
        match &self.gesture {
            Gesture::Dragging { node, offset } => Some((node, *offset)),
            _ => None,
        }
    }

    /// Leave `Dragging`. No effect in any other state.
    pub fn end_drag(&mut self) {
        if matches!(self.gesture, Gesture::Dragging { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Enter `Connecting` from `source`, cancelling any other gesture.
    pub fn begin_connection(&mut self, source: NodeId) {
        self.gesture = Gesture::Connecting {
            source,
            pointer: None,
        };
    }

    pub fn connection_source(&self) -> Option<&NodeId> {
        match &self.gesture {
            Gesture::Connecting { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Record the preview target. No effect unless connecting.
    pub fn update_preview(&mut self, position: Position) {
        if let Gesture::Connecting { pointer, .. } = &mut self.gesture {
            *pointer = Some(position);
        }
    }

    /// Leave `Connecting`, returning the source it had.
    pub fn take_connection(&mut self) -> Option<NodeId> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Connecting { source, .. } => Some(source),
            other => {
                self.gesture = other;
                None
            }
        }
    }

    /// Drop any selection or gesture that names `node`.
    pub fn forget(&mut self, node: &NodeId) {
        if self.selected.as_ref() == Some(node) {
            self.selected = None;
        }
        if self.gesture.references(node) {
            self.gesture = Gesture::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_a_drag_cancels_a_connection() {
        let mut state = InteractionState::new();
        state.begin_connection("a".into());
        state.begin_drag("b".into(), Position::new(1.0, 2.0));

        assert_eq!(state.connection_source(), None);
        assert_eq!(state.drag(), Some((&NodeId::from("b"), Position::new(1.0, 2.0))));
        assert_eq!(state.selected(), Some(&NodeId::from("b")));
    }

    #[test]
    fn starting_a_connection_cancels_a_drag() {
        let mut state = InteractionState::new();
        state.begin_drag("a".into(), Position::default());
        state.begin_connection("b".into());

        assert!(state.drag().is_none());
        assert_eq!(state.connection_source(), Some(&NodeId::from("b")));
    }

    #[test]
    fn take_connection_leaves_other_gestures_alone() {
        let mut state = InteractionState::new();
        state.begin_drag("a".into(), Position::default());

        assert_eq!(state.take_connection(), None);
        assert!(state.drag().is_some());
    }

    #[test]
    fn preview_only_updates_while_connecting() {
        let mut state = InteractionState::new();
        state.update_preview(Position::new(5.0, 5.0));
        assert!(state.gesture().is_idle());

        state.begin_connection("a".into());
        state.update_preview(Position::new(5.0, 5.0));
        assert_eq!(
            state.gesture(),
            &Gesture::Connecting {
                source: "a".into(),
                pointer: Some(Position::new(5.0, 5.0)),
            }
        );
    }

    #[test]
    fn forget_clears_references_to_node() {
        let mut state = InteractionState::new();
        state.begin_drag("a".into(), Position::default());
        state.forget(&"a".into());

        assert!(state.gesture().is_idle());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn forget_keeps_unrelated_state() {
        let mut state = InteractionState::new();
        state.select(Some("a".into()));
        state.begin_connection("b".into());
        state.forget(&"c".into());

        assert_eq!(state.selected(), Some(&NodeId::from("a")));
        assert_eq!(state.connection_source(), Some(&NodeId::from("b")));
    }
}
