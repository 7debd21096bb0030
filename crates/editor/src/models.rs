//! Core data model for the workflow graph editor.
//!
//! These types are what a graph looks like in memory and on the wire.
//! A [`GraphSnapshot`] is the unit handed to persistence and the shape
//! starter templates are written in.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Opaque node identifier, unique within one graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in canvas space. Unbounded: negative and off-screen values are fine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates rounded to the nearest integer, as the properties
    /// panel displays them.
    pub fn rounded(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// NodeCategory
// ---------------------------------------------------------------------------

/// What kind of step a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Trigger,
    Action,
    Condition,
    Delay,
    Webhook,
    Filter,
    Integration,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 7] = [
        Self::Trigger,
        Self::Action,
        Self::Condition,
        Self::Delay,
        Self::Webhook,
        Self::Filter,
        Self::Integration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Condition => "condition",
            Self::Delay => "delay",
            Self::Webhook => "webhook",
            Self::Filter => "filter",
            Self::Integration => "integration",
        }
    }

    /// Presentation group used when a template does not pick its own.
    pub fn default_style(self) -> StyleTag {
        match self {
            Self::Trigger => StyleTag::Primary,
            Self::Action | Self::Delay | Self::Filter => StyleTag::Warning,
            Self::Condition | Self::Integration => StyleTag::Workflow,
            Self::Webhook => StyleTag::Info,
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown node category: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Glyph / StyleTag
// ---------------------------------------------------------------------------

/// Icon reference. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Zap,
    Mail,
    Message,
    Branch,
    Chart,
    Check,
    Clock,
    Link,
    Search,
    Globe,
}

impl Glyph {
    /// Pick a glyph from keywords in a node label, falling back to [`Glyph::Zap`].
    pub fn infer_from_label(label: &str) -> Self {
        const KEYWORDS: [(&str, Glyph); 9] = [
            ("email", Glyph::Mail),
            ("whatsapp", Glyph::Message),
            ("condition", Glyph::Branch),
            ("crm", Glyph::Chart),
            ("task", Glyph::Check),
            ("delay", Glyph::Clock),
            ("webhook", Glyph::Link),
            ("filter", Glyph::Search),
            ("api", Glyph::Globe),
        ];

        let label = label.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|&(_, glyph)| glyph)
            .unwrap_or(Glyph::Zap)
    }
}

/// Presentation grouping (the colour band of a rendered node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Primary,
    Warning,
    Whatsapp,
    Workflow,
    Info,
    Success,
}

// ---------------------------------------------------------------------------
// Node / Connection
// ---------------------------------------------------------------------------

/// A positioned step in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub category: NodeCategory,
    pub label: String,
    pub glyph: Glyph,
    pub position: Position,
    pub style: StyleTag,
}

impl Node {
    pub fn is_trigger(&self) -> bool {
        self.category == NodeCategory::Trigger
    }
}

/// Directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether either endpoint is `node`.
    pub fn involves(&self, node: &NodeId) -> bool {
        &self.from == node || &self.to == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

// ---------------------------------------------------------------------------
// GraphSnapshot
// ---------------------------------------------------------------------------

/// Immutable copy of a graph's nodes and connections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { nodes, connections }
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Connections with at least one endpoint missing from `nodes`.
    pub fn orphaned_connections(&self) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| self.node(&c.from).is_none() || self.node(&c.to).is_none())
            .collect()
    }

    pub fn trigger_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_trigger()).count()
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A palette entry that `add_node` instantiates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub category: NodeCategory,
    pub label: String,
    pub glyph: Glyph,
    pub style: StyleTag,
    pub description: String,
}

impl NodeTemplate {
    /// Build a template whose glyph is inferred from the label.
    pub fn new(
        category: NodeCategory,
        label: impl Into<String>,
        style: StyleTag,
        description: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            category,
            glyph: Glyph::infer_from_label(&label),
            label,
            style,
            description: description.into(),
        }
    }
}

/// A named starter graph that `load_template` swaps in wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub name: String,
    pub description: String,
    pub graph: GraphSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_inference_matches_keywords() {
        assert_eq!(Glyph::infer_from_label("Send Email"), Glyph::Mail);
        assert_eq!(Glyph::infer_from_label("WhatsApp Message"), Glyph::Message);
        assert_eq!(Glyph::infer_from_label("Update CRM"), Glyph::Chart);
        assert_eq!(Glyph::infer_from_label("Wait/Delay"), Glyph::Clock);
        assert_eq!(Glyph::infer_from_label("API Call"), Glyph::Globe);
        assert_eq!(Glyph::infer_from_label("Trigger"), Glyph::Zap);
    }

    #[test]
    fn node_serializes_category_as_type() {
        let node = Node {
            id: "start".into(),
            category: NodeCategory::Trigger,
            label: "Start".into(),
            glyph: Glyph::Zap,
            position: Position::new(100.0, 200.0),
            style: StyleTag::Primary,
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "trigger");
        assert_eq!(json["id"], "start");
        assert_eq!(json["glyph"], "zap");
        assert_eq!(json["position"]["y"], 200.0);
    }

    #[test]
    fn orphaned_connections_are_reported() {
        let snapshot = GraphSnapshot::new(
            vec![Node {
                id: "a".into(),
                category: NodeCategory::Action,
                label: "A".into(),
                glyph: Glyph::Mail,
                position: Position::default(),
                style: StyleTag::Warning,
            }],
            vec![Connection::new("a", "ghost")],
        );

        let orphans = snapshot.orphaned_connections();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].to.as_str(), "ghost");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Delay".parse::<NodeCategory>(), Ok(NodeCategory::Delay));
        assert!("loop".parse::<NodeCategory>().is_err());
    }
}
