//! Snapshot Types
//!
//! Read-only views of the contact graph and of each agent's knowledge,
//! in the shape a renderer needs for drawing and coloring nodes.

use serde::{Deserialize, Serialize};

use crate::AgentId;

/// Knowledge flags of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: AgentId,
    pub heard: bool,
    /// One flag per knowledge level, shallowest first.
    pub attained: Vec<bool>,
}

impl AgentSnapshot {
    /// Deepest level this agent holds, if any.
    pub fn highest_level(&self) -> Option<usize> {
        self.attained.iter().rposition(|&flag| flag)
    }
}

/// The contact graph as an undirected edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub agent_count: usize,
    /// Each edge once, smaller endpoint first. Self-loops appear as `(a, a)`.
    #[serde(default)]
    pub edges: Vec<(AgentId, AgentId)>,
}
