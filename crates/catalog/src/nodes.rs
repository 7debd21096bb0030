//! The node palette.

use editor::{NodeCategory, NodeTemplate, StyleTag};

/// The ten palette entries, in display order.
pub fn node_templates() -> Vec<NodeTemplate> {
    use NodeCategory::*;

    [
        (Trigger, "Trigger", StyleTag::Primary, "Start automation"),
        (Action, "Send Email", StyleTag::Warning, "Send email to contacts"),
        (Action, "WhatsApp Message", StyleTag::Whatsapp, "Send WhatsApp message"),
        (Condition, "Condition", StyleTag::Workflow, "Add conditional logic"),
        (Action, "Update CRM", StyleTag::Info, "Update customer data"),
        (Action, "Create Task", StyleTag::Success, "Create new task"),
        (Delay, "Wait/Delay", StyleTag::Warning, "Add time delay"),
        (Webhook, "Webhook", StyleTag::Info, "Send/receive webhook"),
        (Filter, "Filter", StyleTag::Warning, "Filter data"),
        (Integration, "API Call", StyleTag::Workflow, "External API integration"),
    ]
    .into_iter()
    .map(|(category, label, style, description)| {
        NodeTemplate::new(category, label, style, description)
    })
    .collect()
}
