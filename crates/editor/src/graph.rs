//! The in-memory node/connection collections owned by one editor session.
//!
//! Nothing here fails: operations that name a missing node or would create
//! a degenerate edge report what happened through their return value and
//! leave the graph untouched.

use std::collections::HashSet;

use crate::ids::NodeIdGenerator;
use crate::models::{Connection, GraphSnapshot, Node, NodeId, NodeTemplate, Position};

/// What `connect` did with a requested edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    Created,
    SelfLoop,
    Duplicate,
    UnknownEndpoint,
}

/// Nodes and directed connections, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    ids: NodeIdGenerator,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        Self {
            nodes: snapshot.nodes,
            connections: snapshot.connections,
            ids: NodeIdGenerator::new(),
        }
    }

    // ========== Node Operations ==========

    /// Instantiate `template` at `position` and append it. Returns the new id.
    pub fn add_node(&mut self, template: &NodeTemplate, position: Position) -> NodeId {
        let taken: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let id = self.ids.next(template.category, &taken);

        self.nodes.push(Node {
            id: id.clone(),
            category: template.category,
            label: template.label.clone(),
            glyph: template.glyph,
            position,
            style: template.style,
        });
        id
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Move a node. Returns `false` if it does not exist.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove a node and every connection touching it.
    ///
    /// Returns the number of connections removed alongside it, or `None`
    /// if the node does not exist.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<usize> {
        let index = self.nodes.iter().position(|n| &n.id == id)?;
        self.nodes.remove(index);

        let before = self.connections.len();
        self.connections.retain(|c| !c.involves(id));
        Some(before - self.connections.len())
    }

    // ========== Connection Operations ==========

    /// Add a `from → to` edge unless it is a self-loop, a duplicate, or
    /// names a node that does not exist.
    pub fn connect(&mut self, from: &NodeId, to: &NodeId) -> ConnectOutcome {
        if from == to {
            return ConnectOutcome::SelfLoop;
        }
        if !self.contains(from) || !self.contains(to) {
            return ConnectOutcome::UnknownEndpoint;
        }
        if self.has_connection(from, to) {
            return ConnectOutcome::Duplicate;
        }

        self.connections.push(Connection::new(from.clone(), to.clone()));
        ConnectOutcome::Created
    }

    pub fn has_connection(&self, from: &NodeId, to: &NodeId) -> bool {
        self.connections
            .iter()
            .any(|c| &c.from == from && &c.to == to)
    }

    /// Remove the `from → to` edge. Returns `false` if there was none.
    pub fn disconnect(&mut self, from: &NodeId, to: &NodeId) -> bool {
        let before = self.connections.len();
        self.connections
            .retain(|c| !(&c.from == from && &c.to == to));
        self.connections.len() != before
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    // ========== Whole-graph Operations ==========

    /// Overwrite everything with `snapshot`. The id counter keeps running so
    /// ids handed out earlier are never reissued.
    pub fn replace(&mut self, snapshot: GraphSnapshot) {
        self.nodes = snapshot.nodes;
        self.connections = snapshot.connections;
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes.clone(), self.connections.clone())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_trigger()).count()
    }
}
