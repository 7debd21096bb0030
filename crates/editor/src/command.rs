//! Replayable editor commands.
//!
//! Every pointer or keyboard operation a host can dispatch has a
//! serialisable [`EditorCommand`] counterpart. A recorded script of commands
//! can be replayed against any session with [`apply`]. Templates are named,
//! not embedded, and resolved through a [`TemplateSource`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{NodeId, NodeTemplate, Position, WorkflowTemplate};
use crate::session::EditorSession;

/// Read-only lookup of palette and starter templates.
pub trait TemplateSource {
    fn node_template(&self, label: &str) -> Option<&NodeTemplate>;

    fn workflow_template(&self, name: &str) -> Option<&WorkflowTemplate>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    AddNode {
        template: String,
        #[serde(default)]
        position: Option<Position>,
    },
    LoadTemplate {
        name: String,
    },
    BeginDrag {
        node: NodeId,
        pointer: Position,
    },
    UpdateDrag {
        pointer: Position,
    },
    EndDrag,
    BeginConnection {
        node: NodeId,
    },
    UpdateConnectionPreview {
        pointer: Position,
    },
    CompleteConnection {
        target: NodeId,
    },
    CancelConnection,
    DeleteNode {
        node: NodeId,
    },
    DeleteConnection {
        from: NodeId,
        to: NodeId,
    },
    Clear,
    UpdateLabel {
        node: NodeId,
        label: String,
    },
    Select {
        #[serde(default)]
        node: Option<NodeId>,
    },
}

/// Dispatch one command. Unknown template names are ignored like any other
/// invalid reference.
pub fn apply<S>(session: &mut S, command: &EditorCommand, templates: &dyn TemplateSource)
where
    S: EditorSession + ?Sized,
{
    match command {
        EditorCommand::AddNode { template, position } => match templates.node_template(template) {
            Some(t) => {
                session.add_node(t, *position);
            }
            None => debug!(template = %template, "unknown node template"),
        },
        EditorCommand::LoadTemplate { name } => match templates.workflow_template(name) {
            Some(t) => session.load_template(t),
            None => debug!(template = %name, "unknown workflow template"),
        },
        EditorCommand::BeginDrag { node, pointer } => session.begin_drag(node, *pointer),
        EditorCommand::UpdateDrag { pointer } => session.update_drag(*pointer),
        EditorCommand::EndDrag => session.end_drag(),
        EditorCommand::BeginConnection { node } => session.begin_connection(node),
        EditorCommand::UpdateConnectionPreview { pointer } => {
            session.update_connection_preview(*pointer)
        }
        EditorCommand::CompleteConnection { target } => {
            session.complete_connection(target);
        }
        EditorCommand::CancelConnection => session.cancel_connection(),
        EditorCommand::DeleteNode { node } => session.delete_node(node),
        EditorCommand::DeleteConnection { from, to } => session.delete_connection(from, to),
        EditorCommand::Clear => session.clear(),
        EditorCommand::UpdateLabel { node, label } => session.update_label(node, label),
        EditorCommand::Select { node } => session.set_selected_node(node.as_ref()),
    }
}

/// Apply a whole script in order.
pub fn replay<S>(session: &mut S, commands: &[EditorCommand], templates: &dyn TemplateSource)
where
    S: EditorSession + ?Sized,
{
    for command in commands {
        apply(session, command, templates);
    }
}
