//! `catalog` crate: static reference data for the workflow builder.
//!
//! Holds the node palette and the starter workflows. The editor treats all
//! of it as read-only input; nothing here is session state.

pub mod nodes;
pub mod workflows;

use editor::{NodeTemplate, TemplateSource, WorkflowTemplate};
use serde::Serialize;
use tracing::debug;

pub use nodes::node_templates;
pub use workflows::workflow_templates;

/// Palette and starter workflows, looked up by label / name ignoring case.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    nodes: Vec<NodeTemplate>,
    workflows: Vec<WorkflowTemplate>,
}

impl Catalog {
    pub fn new(nodes: Vec<NodeTemplate>, workflows: Vec<WorkflowTemplate>) -> Self {
        Self { nodes, workflows }
    }

    /// The built-in palette and starter workflows.
    pub fn builtin() -> Self {
        let catalog = Self::new(node_templates(), workflow_templates());
        debug!(
            nodes = catalog.nodes.len(),
            workflows = catalog.workflows.len(),
            "built-in catalog loaded"
        );
        catalog
    }

    pub fn nodes(&self) -> &[NodeTemplate] {
        &self.nodes
    }

    pub fn workflows(&self) -> &[WorkflowTemplate] {
        &self.workflows
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSource for Catalog {
    fn node_template(&self, label: &str) -> Option<&NodeTemplate> {
        self.nodes.iter().find(|t| t.label.eq_ignore_ascii_case(label))
    }

    fn workflow_template(&self, name: &str) -> Option<&WorkflowTemplate> {
        self.workflows.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let catalog = Catalog::builtin();
        assert!(catalog.node_template("send email").is_some());
        assert!(catalog.workflow_template("DATA SYNC").is_some());
        assert!(catalog.workflow_template("Payroll").is_none());
    }
}
