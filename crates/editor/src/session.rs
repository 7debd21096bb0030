//! Editor sessions.
//!
//! A session owns one graph plus its interaction state. The mode is chosen
//! once, when the session is opened, by picking one of two implementations
//! of [`EditorSession`]:
//!
//! - [`EditableSession`] applies every operation.
//! - [`ReadOnlySession`] turns every mutating operation into a no-op while
//!   keeping selection, inspection and rendering queries available.
//!
//! No operation returns an error. Unknown ids, self-loops, duplicate edges
//! and mode violations are dropped and only show up as `tracing` events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::EditorConfig;
use crate::geometry::{self, EdgePath, PreviewLine};
use crate::graph::{ConnectOutcome, Graph};
use crate::inspector::{GraphStats, NodeInspection};
use crate::interaction::{Gesture, InteractionState};
use crate::models::{
    Connection, GraphSnapshot, Glyph, Node, NodeCategory, NodeId, NodeTemplate, Position,
    StyleTag, WorkflowTemplate,
};

/// Indicator text a read-only session keeps on screen.
pub const READ_ONLY_BANNER: &str = "This workflow is in view-only mode";

/// Id of the trigger node every fresh or cleared graph starts with.
pub const START_NODE_ID: &str = "start-1";

// ---------------------------------------------------------------------------
// SessionMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Editable,
    ReadOnly,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editable => write!(f, "editable"),
            Self::ReadOnly => write!(f, "read_only"),
        }
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editable" | "admin" => Ok(Self::Editable),
            "read_only" | "read-only" | "user" => Ok(Self::ReadOnly),
            other => Err(format!("unknown session mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// EditorCore
// ---------------------------------------------------------------------------

/// State shared by both session kinds.
///
/// The public surface is read-only; mutation goes through a session.
#[derive(Debug, Clone)]
pub struct EditorCore {
    graph: Graph,
    interaction: InteractionState,
    config: EditorConfig,
}

impl EditorCore {
    fn new(initial: Option<GraphSnapshot>, config: EditorConfig) -> Self {
        let snapshot = initial.unwrap_or_else(|| default_graph(&config));
        Self {
            graph: Graph::from_snapshot(snapshot),
            interaction: InteractionState::new(),
            config,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn select(&mut self, node: Option<&NodeId>) {
        let node = node.filter(|id| self.graph.contains(id)).cloned();
        self.interaction.select(node);
    }
}

/// The single trigger node a new or cleared graph holds.
pub fn default_graph(config: &EditorConfig) -> GraphSnapshot {
    GraphSnapshot::new(
        vec![Node {
            id: NodeId::new(START_NODE_ID),
            category: NodeCategory::Trigger,
            label: "Start".into(),
            glyph: Glyph::Zap,
            position: config.start_position,
            style: StyleTag::Primary,
        }],
        Vec::new(),
    )
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

/// Capability interface over an editor session.
///
/// Read queries are provided here once; each implementation decides what
/// the mutating operations do.
pub trait EditorSession {
    fn core(&self) -> &EditorCore;

    fn mode(&self) -> SessionMode;

    /// Create a node from a palette template. Returns the new id, or `None`
    /// when the session is read-only.
    fn add_node(&mut self, template: &NodeTemplate, position: Option<Position>) -> Option<NodeId>;

    /// Replace all nodes and connections with the template's graph.
    fn load_template(&mut self, template: &WorkflowTemplate);

    /// Start dragging `node`, grabbing it at `pointer` (canvas space).
    fn begin_drag(&mut self, node: &NodeId, pointer: Position);

    /// Start dragging `node` with a grab offset the host measured itself.
    fn begin_drag_with_offset(&mut self, node: &NodeId, offset: Position);

    fn update_drag(&mut self, pointer: Position);

    fn end_drag(&mut self);

    fn begin_connection(&mut self, source: &NodeId);

    fn update_connection_preview(&mut self, pointer: Position);

    /// Finish the connection gesture on `target`. Returns whether an edge
    /// was created. The gesture ends either way.
    fn complete_connection(&mut self, target: &NodeId) -> bool;

    fn cancel_connection(&mut self);

    /// Remove a node and every connection touching it.
    fn delete_node(&mut self, node: &NodeId);

    fn delete_connection(&mut self, from: &NodeId, to: &NodeId);

    /// Reset to the single default trigger node. The caller confirms first.
    fn clear(&mut self);

    fn update_label(&mut self, node: &NodeId, label: &str);

    fn set_selected_node(&mut self, node: Option<&NodeId>);

    /// Snapshot for the persistence collaborator. `None` when read-only.
    fn save(&self) -> Option<GraphSnapshot>;

    // ----- provided queries -----

    fn nodes(&self) -> &[Node] {
        self.core().graph().nodes()
    }

    fn connections(&self) -> &[Connection] {
        self.core().graph().connections()
    }

    fn node(&self, id: &NodeId) -> Option<&Node> {
        self.core().graph().node(id)
    }

    fn snapshot(&self) -> GraphSnapshot {
        self.core().graph().snapshot()
    }

    fn selected_node(&self) -> Option<&Node> {
        let id = self.core().interaction().selected()?;
        self.node(id)
    }

    fn gesture(&self) -> &Gesture {
        self.core().interaction().gesture()
    }

    fn is_read_only(&self) -> bool {
        self.mode() == SessionMode::ReadOnly
    }

    fn inspect(&self, id: &NodeId) -> Option<NodeInspection> {
        self.node(id)
            .map(|node| NodeInspection::of(node, !self.is_read_only()))
    }

    fn stats(&self) -> GraphStats {
        let graph = self.core().graph();
        GraphStats {
            nodes: graph.node_count(),
            connections: graph.connection_count(),
        }
    }

    /// Curves for every connection with both endpoints present.
    fn edge_paths(&self) -> Vec<EdgePath> {
        let core = self.core();
        geometry::edge_paths(
            core.graph().nodes(),
            core.graph().connections(),
            &core.config().node_box,
        )
    }

    /// Dashed preview while a connection gesture has a pointer position.
    fn preview_line(&self) -> Option<PreviewLine> {
        match self.gesture() {
            Gesture::Connecting {
                source,
                pointer: Some(pointer),
            } => {
                let source = self.node(source)?;
                Some(geometry::preview_line(
                    source,
                    *pointer,
                    &self.core().config().node_box,
                ))
            }
            _ => None,
        }
    }

    fn mode_banner(&self) -> Option<&'static str> {
        self.is_read_only().then_some(READ_ONLY_BANNER)
    }

    /// The "start building" hint shown over an untouched canvas.
    fn shows_canvas_guide(&self) -> bool {
        !self.is_read_only() && self.core().graph().node_count() == 1
    }

    /// Caller-side delete policy: trigger nodes are not offered for deletion.
    fn can_delete(&self, id: &NodeId) -> bool {
        !self.is_read_only() && self.node(id).is_some_and(|n| !n.is_trigger())
    }
}

/// Open a session in `mode`. With no initial snapshot the graph starts as
/// the single default trigger node.
pub fn open_session(
    mode: SessionMode,
    initial: Option<GraphSnapshot>,
    config: EditorConfig,
) -> Box<dyn EditorSession> {
    match mode {
        SessionMode::Editable => Box::new(EditableSession::new(initial, config)),
        SessionMode::ReadOnly => Box::new(ReadOnlySession::new(initial, config)),
    }
}

// ---------------------------------------------------------------------------
// EditableSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EditableSession {
    core: EditorCore,
}

impl EditableSession {
    pub fn new(initial: Option<GraphSnapshot>, config: EditorConfig) -> Self {
        Self {
            core: EditorCore::new(initial, config),
        }
    }
}

impl Default for EditableSession {
    fn default() -> Self {
        Self::new(None, EditorConfig::default())
    }
}

impl EditorSession for EditableSession {
    fn core(&self) -> &EditorCore {
        &self.core
    }

    fn mode(&self) -> SessionMode {
        SessionMode::Editable
    }

    fn add_node(&mut self, template: &NodeTemplate, position: Option<Position>) -> Option<NodeId> {
        let position = position.unwrap_or(self.core.config.default_drop_position);
        let id = self.core.graph.add_node(template, position);
        debug!(node = %id, category = %template.category, "node added");
        Some(id)
    }

    fn load_template(&mut self, template: &WorkflowTemplate) {
        self.core.graph.replace(template.graph.clone());
        self.core.interaction.reset();
        info!(
            template = %template.name,
            nodes = template.graph.nodes.len(),
            connections = template.graph.connections.len(),
            "template loaded"
        );
    }

    fn begin_drag(&mut self, node: &NodeId, pointer: Position) {
        let Some(origin) = self.core.graph.node(node).map(|n| n.position) else {
            debug!(node = %node, "drag ignored: unknown node");
            return;
        };
        self.core.interaction.begin_drag(node.clone(), pointer - origin);
    }

    fn begin_drag_with_offset(&mut self, node: &NodeId, offset: Position) {
        if !self.core.graph.contains(node) {
            debug!(node = %node, "drag ignored: unknown node");
            return;
        }
        self.core.interaction.begin_drag(node.clone(), offset);
    }

    fn update_drag(&mut self, pointer: Position) {
        let Some((node, offset)) = self.core.interaction.drag() else {
            return;
        };
        let node = node.clone();
        let position = pointer - offset;
        trace!(node = %node, x = position.x, y = position.y, "drag");
        self.core.graph.move_node(&node, position);
    }

    fn end_drag(&mut self) {
        self.core.interaction.end_drag();
    }

    fn begin_connection(&mut self, source: &NodeId) {
        if !self.core.graph.contains(source) {
            debug!(node = %source, "connection ignored: unknown source");
            return;
        }
        self.core.interaction.begin_connection(source.clone());
    }

    fn update_connection_preview(&mut self, pointer: Position) {
        self.core.interaction.update_preview(pointer);
    }

    fn complete_connection(&mut self, target: &NodeId) -> bool {
        let Some(source) = self.core.interaction.take_connection() else {
            return false;
        };

        match self.core.graph.connect(&source, target) {
            ConnectOutcome::Created => {
                debug!(from = %source, to = %target, "connection created");
                true
            }
            outcome => {
                debug!(from = %source, to = %target, ?outcome, "connection not created");
                false
            }
        }
    }

    fn cancel_connection(&mut self) {
        self.core.interaction.take_connection();
    }

    fn delete_node(&mut self, node: &NodeId) {
        if let Some(removed) = self.core.graph.remove_node(node) {
            self.core.interaction.forget(node);
            debug!(node = %node, connections = removed, "node deleted");
        }
    }

    fn delete_connection(&mut self, from: &NodeId, to: &NodeId) {
        if self.core.graph.disconnect(from, to) {
            debug!(from = %from, to = %to, "connection deleted");
        }
    }

    fn clear(&mut self) {
        let fresh = default_graph(&self.core.config);
        self.core.graph.replace(fresh);
        self.core.interaction.reset();
        info!("canvas cleared");
    }

    fn update_label(&mut self, node: &NodeId, label: &str) {
        if let Some(node) = self.core.graph.node_mut(node) {
            node.label = label.to_owned();
        }
    }

    fn set_selected_node(&mut self, node: Option<&NodeId>) {
        self.core.select(node);
    }

    fn save(&self) -> Option<GraphSnapshot> {
        let snapshot = self.core.graph.snapshot();
        info!(
            nodes = snapshot.nodes.len(),
            connections = snapshot.connections.len(),
            "workflow snapshot taken"
        );
        Some(snapshot)
    }
}

// ---------------------------------------------------------------------------
// ReadOnlySession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReadOnlySession {
    core: EditorCore,
}

impl ReadOnlySession {
    pub fn new(initial: Option<GraphSnapshot>, config: EditorConfig) -> Self {
        Self {
            core: EditorCore::new(initial, config),
        }
    }
}

fn ignored(operation: &'static str) {
    debug!(operation, "ignored in read-only session");
}

impl EditorSession for ReadOnlySession {
    fn core(&self) -> &EditorCore {
        &self.core
    }

    fn mode(&self) -> SessionMode {
        SessionMode::ReadOnly
    }

    fn add_node(&mut self, _template: &NodeTemplate, _position: Option<Position>) -> Option<NodeId> {
        ignored("add_node");
        None
    }

    fn load_template(&mut self, _template: &WorkflowTemplate) {
        ignored("load_template");
    }

    fn begin_drag(&mut self, _node: &NodeId, _pointer: Position) {
        ignored("begin_drag");
    }

    fn begin_drag_with_offset(&mut self, _node: &NodeId, _offset: Position) {
        ignored("begin_drag");
    }

    fn update_drag(&mut self, _pointer: Position) {}

    fn end_drag(&mut self) {}

    fn begin_connection(&mut self, _source: &NodeId) {
        ignored("begin_connection");
    }

    fn update_connection_preview(&mut self, _pointer: Position) {}

    fn complete_connection(&mut self, _target: &NodeId) -> bool {
        false
    }

    fn cancel_connection(&mut self) {}

    fn delete_node(&mut self, _node: &NodeId) {
        ignored("delete_node");
    }

    fn delete_connection(&mut self, _from: &NodeId, _to: &NodeId) {
        ignored("delete_connection");
    }

    fn clear(&mut self) {
        ignored("clear");
    }

    fn update_label(&mut self, _node: &NodeId, _label: &str) {
        ignored("update_label");
    }

    fn set_selected_node(&mut self, node: Option<&NodeId>) {
        self.core.select(node);
    }

    fn save(&self) -> Option<GraphSnapshot> {
        ignored("save");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> NodeTemplate {
        NodeTemplate::new(NodeCategory::Action, "Send Email", StyleTag::Warning, "")
    }

    fn start() -> NodeId {
        NodeId::new(START_NODE_ID)
    }

    #[test]
    fn new_session_holds_default_trigger() {
        let session = EditableSession::default();
        assert_eq!(session.nodes().len(), 1);
        assert!(session.nodes()[0].is_trigger());
        assert_eq!(session.nodes()[0].position, Position::new(100.0, 200.0));
        assert!(session.connections().is_empty());
        assert!(session.shows_canvas_guide());
    }

    #[test]
    fn add_node_without_position_uses_default_drop_point() {
        let mut session = EditableSession::default();
        let id = session.add_node(&action(), None).unwrap();
        assert_eq!(session.node(&id).unwrap().position, Position::new(400.0, 300.0));
        assert!(!session.shows_canvas_guide());
    }

    #[test]
    fn begin_drag_on_unknown_node_changes_nothing() {
        let mut session = EditableSession::default();
        session.begin_drag(&"ghost".into(), Position::new(1.0, 1.0));
        assert!(session.gesture().is_idle());
        assert!(session.selected_node().is_none());
    }

    #[test]
    fn drag_moves_node_by_pointer_minus_offset() {
        let mut session = EditableSession::default();
        session.begin_drag(&start(), Position::new(110.0, 215.0));
        assert_eq!(session.selected_node().unwrap().id, start());

        session.update_drag(Position::new(-50.0, 15.0));
        assert_eq!(session.node(&start()).unwrap().position, Position::new(-60.0, 0.0));

        session.end_drag();
        assert!(session.gesture().is_idle());
        session.update_drag(Position::new(900.0, 900.0));
        assert_eq!(session.node(&start()).unwrap().position, Position::new(-60.0, 0.0));
    }

    #[test]
    fn completing_without_a_gesture_creates_nothing() {
        let mut session = EditableSession::default();
        let id = session.add_node(&action(), None).unwrap();
        assert!(!session.complete_connection(&id));
        assert!(session.connections().is_empty());
    }

    #[test]
    fn self_loop_cancels_gesture() {
        let mut session = EditableSession::default();
        session.begin_connection(&start());
        assert!(!session.complete_connection(&start()));
        assert!(session.connections().is_empty());
        assert!(session.gesture().is_idle());
    }

    #[test]
    fn cancel_connection_returns_to_idle() {
        let mut session = EditableSession::default();
        session.begin_connection(&start());
        session.update_connection_preview(Position::new(300.0, 300.0));
        assert!(session.preview_line().is_some());

        session.cancel_connection();
        assert!(session.gesture().is_idle());
        assert!(session.preview_line().is_none());
    }

    #[test]
    fn preview_line_starts_at_source_anchor() {
        let mut session = EditableSession::default();
        session.begin_connection(&start());
        assert!(session.preview_line().is_none());

        session.update_connection_preview(Position::new(300.0, 260.0));
        let line = session.preview_line().unwrap();
        assert_eq!(line.start, Position::new(175.0, 240.0));
        assert_eq!(line.end, Position::new(300.0, 260.0));
    }

    #[test]
    fn deleting_selected_node_clears_selection_and_gesture() {
        let mut session = EditableSession::default();
        let id = session.add_node(&action(), None).unwrap();
        session.set_selected_node(Some(&id));
        session.begin_connection(&id);

        session.delete_node(&id);
        assert!(session.selected_node().is_none());
        assert!(session.gesture().is_idle());
    }

    #[test]
    fn core_deletes_last_trigger_but_policy_refuses() {
        let mut session = EditableSession::default();
        assert!(!session.can_delete(&start()));

        session.delete_node(&start());
        assert!(session.nodes().is_empty());
        assert_eq!(session.core().graph().trigger_count(), 0);
    }

    #[test]
    fn clear_restores_default_graph_and_resets_interaction() {
        let mut session = EditableSession::default();
        let id = session.add_node(&action(), None).unwrap();
        session.begin_connection(&start());
        session.complete_connection(&id);
        session.set_selected_node(Some(&id));

        session.clear();
        assert_eq!(session.snapshot(), default_graph(&EditorConfig::default()));
        assert!(session.selected_node().is_none());
    }

    #[test]
    fn load_template_ends_drag_and_clears_selection() {
        let mut session = EditableSession::default();
        session.set_selected_node(Some(&start()));
        session.begin_drag(&start(), Position::new(120.0, 220.0));
        assert!(matches!(session.gesture(), Gesture::Dragging { .. }));

        let template = WorkflowTemplate {
            name: "Blank".into(),
            description: String::new(),
            graph: default_graph(&EditorConfig::default()),
        };
        session.load_template(&template);

        assert!(session.gesture().is_idle());
        assert!(session.selected_node().is_none());

        session.update_drag(Position::new(500.0, 500.0));
        assert_eq!(session.node(&start()).unwrap().position, Position::new(100.0, 200.0));
    }

    #[test]
    fn clear_ends_pending_connection() {
        let mut session = EditableSession::default();
        let id = session.add_node(&action(), None).unwrap();
        session.begin_connection(&start());
        session.update_connection_preview(Position::new(300.0, 300.0));
        assert!(session.preview_line().is_some());

        session.clear();

        assert!(session.gesture().is_idle());
        assert!(session.preview_line().is_none());
        assert!(!session.complete_connection(&id));
        assert!(session.connections().is_empty());
    }

    #[test]
    fn update_label_renames_node() {
        let mut session = EditableSession::default();
        session.update_label(&start(), "New Lead");
        assert_eq!(session.node(&start()).unwrap().label, "New Lead");
    }

    #[test]
    fn selecting_unknown_node_clears_selection() {
        let mut session = EditableSession::default();
        session.set_selected_node(Some(&start()));
        session.set_selected_node(Some(&"ghost".into()));
        assert!(session.selected_node().is_none());
    }

    #[test]
    fn read_only_session_ignores_mutations() {
        let mut session = ReadOnlySession::new(None, EditorConfig::default());
        let before = session.snapshot();

        assert_eq!(session.add_node(&action(), None), None);
        session.begin_drag(&start(), Position::default());
        session.update_drag(Position::new(999.0, 999.0));
        session.update_label(&start(), "Renamed");
        session.delete_node(&start());
        session.clear();

        assert_eq!(session.snapshot(), before);
        assert!(session.gesture().is_idle());
        assert_eq!(session.save(), None);
    }

    #[test]
    fn read_only_session_keeps_selection_and_inspection() {
        let mut session = ReadOnlySession::new(None, EditorConfig::default());
        session.set_selected_node(Some(&start()));

        assert_eq!(session.selected_node().unwrap().id, start());
        let inspection = session.inspect(&start()).unwrap();
        assert!(!inspection.editable);
        assert_eq!(inspection.position, (100, 200));
        assert_eq!(session.mode_banner(), Some(READ_ONLY_BANNER));
        assert!(!session.shows_canvas_guide());
        assert!(!session.can_delete(&start()));
    }

    #[test]
    fn open_session_picks_implementation_by_mode() {
        let editable = open_session(SessionMode::Editable, None, EditorConfig::default());
        let read_only = open_session(SessionMode::ReadOnly, None, EditorConfig::default());
        assert_eq!(editable.mode(), SessionMode::Editable);
        assert_eq!(editable.mode_banner(), None);
        assert!(read_only.is_read_only());
    }

    #[test]
    fn session_mode_parses_role_names() {
        assert_eq!("admin".parse::<SessionMode>(), Ok(SessionMode::Editable));
        assert_eq!("user".parse::<SessionMode>(), Ok(SessionMode::ReadOnly));
        assert!("guest".parse::<SessionMode>().is_err());
    }
}
