//! Starter workflows.

use editor::{
    Connection, Glyph, GraphSnapshot, Node, NodeCategory, Position, StyleTag, WorkflowTemplate,
};

fn node(
    id: &str,
    category: NodeCategory,
    label: &str,
    glyph: Glyph,
    (x, y): (f64, f64),
    style: StyleTag,
) -> Node {
    Node {
        id: id.into(),
        category,
        label: label.into(),
        glyph,
        position: Position::new(x, y),
        style,
    }
}

fn template(name: &str, description: &str, nodes: Vec<Node>, edges: &[(&str, &str)]) -> WorkflowTemplate {
    WorkflowTemplate {
        name: name.into(),
        description: description.into(),
        graph: GraphSnapshot::new(
            nodes,
            edges.iter().map(|&(from, to)| Connection::new(from, to)).collect(),
        ),
    }
}

pub fn lead_nurturing() -> WorkflowTemplate {
    use NodeCategory::*;

    template(
        "Lead Nurturing",
        "Automated lead follow-up sequence",
        vec![
            node("start", Trigger, "New Lead", Glyph::Zap, (100.0, 200.0), StyleTag::Primary),
            node("email1", Action, "Welcome Email", Glyph::Mail, (300.0, 200.0), StyleTag::Warning),
            node("delay1", Delay, "Wait 2 Days", Glyph::Clock, (500.0, 200.0), StyleTag::Warning),
            node("email2", Action, "Follow-up Email", Glyph::Mail, (700.0, 200.0), StyleTag::Warning),
        ],
        &[("start", "email1"), ("email1", "delay1"), ("delay1", "email2")],
    )
}

pub fn client_onboarding() -> WorkflowTemplate {
    use NodeCategory::*;

    template(
        "Client Onboarding",
        "New client welcome automation",
        vec![
            node("start", Trigger, "New Client", Glyph::Zap, (100.0, 150.0), StyleTag::Primary),
            node("welcome", Action, "Welcome Message", Glyph::Message, (300.0, 150.0), StyleTag::Whatsapp),
            node("crm", Action, "Update CRM", Glyph::Chart, (300.0, 300.0), StyleTag::Info),
            node("task", Action, "Create Task", Glyph::Check, (500.0, 225.0), StyleTag::Success),
        ],
        &[("start", "welcome"), ("start", "crm"), ("welcome", "task"), ("crm", "task")],
    )
}

pub fn data_sync() -> WorkflowTemplate {
    use NodeCategory::*;

    template(
        "Data Sync",
        "Sync data between platforms",
        vec![
            node("start", Trigger, "Data Update", Glyph::Zap, (100.0, 200.0), StyleTag::Primary),
            node("filter", Filter, "Filter Data", Glyph::Search, (300.0, 200.0), StyleTag::Warning),
            node("api1", Integration, "Sync Platform A", Glyph::Globe, (500.0, 150.0), StyleTag::Workflow),
            node("api2", Integration, "Sync Platform B", Glyph::Globe, (500.0, 250.0), StyleTag::Workflow),
        ],
        &[("start", "filter"), ("filter", "api1"), ("filter", "api2")],
    )
}

pub fn workflow_templates() -> Vec<WorkflowTemplate> {
    vec![lead_nurturing(), client_onboarding(), data_sync()]
}
