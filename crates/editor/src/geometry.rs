//! Rendering-support geometry.
//!
//! Pure functions of node positions. Nothing here touches session state, so
//! a renderer can call them on every frame and tests can call them without
//! any drawing surface.

use crate::config::NodeBox;
use crate::models::{Connection, Node, NodeId, Position};

/// Point where edges attach to a node: its origin offset by half the box.
pub fn anchor(position: Position, node_box: &NodeBox) -> Position {
    position + node_box.anchor_offset()
}

/// A single cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPath {
    pub start: Position,
    pub control1: Position,
    pub control2: Position,
    pub end: Position,
}

impl CubicPath {
    /// SVG path data, e.g. `M 175 240 C 275 240, 275 240, 375 240`.
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y,
        )
    }
}

/// S-curve between two anchors.
///
/// Both control points sit on the horizontal midpoint and keep the vertical
/// coordinate of their own endpoint, so the curve leaves and enters
/// horizontally whatever the vertical offset.
pub fn curve_between(start: Position, end: Position) -> CubicPath {
    let mid_x = (start.x + end.x) / 2.0;
    CubicPath {
        start,
        control1: Position::new(mid_x, start.y),
        control2: Position::new(mid_x, end.y),
        end,
    }
}

/// Curve for an edge from `from` to `to`.
pub fn connection_path(from: &Node, to: &Node, node_box: &NodeBox) -> CubicPath {
    curve_between(anchor(from.position, node_box), anchor(to.position, node_box))
}

/// Straight dashed segment drawn while a connection gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub start: Position,
    pub end: Position,
}

pub fn preview_line(source: &Node, pointer: Position, node_box: &NodeBox) -> PreviewLine {
    PreviewLine {
        start: anchor(source.position, node_box),
        end: pointer,
    }
}

/// A renderable edge: the connection it came from and its curve.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub from: NodeId,
    pub to: NodeId,
    pub path: CubicPath,
}

/// Paths for every connection whose endpoints both exist. Orphans are skipped.
pub fn edge_paths(nodes: &[Node], connections: &[Connection], node_box: &NodeBox) -> Vec<EdgePath> {
    let find = |id: &NodeId| nodes.iter().find(|n| &n.id == id);

    connections
        .iter()
        .filter_map(|c| {
            let from = find(&c.from)?;
            let to = find(&c.to)?;
            Some(EdgePath {
                from: c.from.clone(),
                to: c.to.clone(),
                path: connection_path(from, to, node_box),
            })
        })
        .collect()
}
