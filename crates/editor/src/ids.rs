//! Node id generation.
//!
//! Ids look like `action-3`: the category name plus a per-graph counter.
//! The counter never goes backwards and skips any id already taken, so ids
//! stay unique even after a template with hand-written ids is loaded.

use std::collections::HashSet;

use crate::models::{NodeCategory, NodeId};

#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    /// Next counter value to try.
    counter: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce an id for `category` that is not in `taken`.
    pub fn next(&mut self, category: NodeCategory, taken: &HashSet<&str>) -> NodeId {
        loop {
            self.counter += 1;
            let candidate = format!("{}-{}", category.as_str(), self.counter);
            if !taken.contains(candidate.as_str()) {
                return NodeId::new(candidate);
            }
        }
    }
}
