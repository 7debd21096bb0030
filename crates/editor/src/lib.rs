//! `editor` crate: the workflow graph editor core.
//!
//! Owns the node/connection model, the drag and connect interaction state
//! machine, and the pure geometry a renderer needs. No I/O happens here:
//! `save` hands back a snapshot and persistence is someone else's job.

pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod inspector;
pub mod interaction;
pub mod models;
pub mod session;
pub mod snapshot;

pub use command::{apply, replay, EditorCommand, TemplateSource};
pub use config::{EditorConfig, NodeBox};
pub use error::DecodeError;
pub use graph::{ConnectOutcome, Graph};
pub use inspector::{GraphStats, NodeInspection, PropertyField};
pub use interaction::Gesture;
pub use models::{
    Connection, Glyph, GraphSnapshot, Node, NodeCategory, NodeId, NodeTemplate, Position,
    StyleTag, WorkflowTemplate,
};
pub use session::{
    default_graph, open_session, EditableSession, EditorSession, ReadOnlySession, SessionMode,
};
