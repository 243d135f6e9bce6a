//! Agent Identifiers
//!
//! Agents are numbered densely from zero when the contact graph is built.
//!
//! # Example
//!
//! ```
//! use rumor_events::AgentId;
//!
//! let agent = AgentId::from_index(3);
//! assert_eq!(agent.index(), 3);
//! assert_eq!(agent.to_string(), "agent_3");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an agent, an integer in `[0, agent_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Builds an id from a position in an agent-indexed table.
    ///
    /// Agent counts are bounded by `u32`; larger indices saturate.
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of this agent in agent-indexed tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
