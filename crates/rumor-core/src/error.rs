//! Simulation errors.
//!
//! Every error is raised while a run is being set up. Once a simulator
//! exists its rounds are total functions over finite sets.

use rumor_events::AgentId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Rejected graph parameters, e.g. an empty agent set.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Knowledge depth must be at least one level.
    #[error("invalid knowledge depth {0}: at least one level is required")]
    InvalidDepth(usize),

    /// An agent id outside the graph's agent range.
    #[error("{agent} is outside a population of {agent_count} agents")]
    UnknownAgent { agent: AgentId, agent_count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SimError::InvalidDepth(0).to_string(),
            "invalid knowledge depth 0: at least one level is required"
        );
        assert_eq!(
            SimError::UnknownAgent { agent: AgentId(9), agent_count: 4 }.to_string(),
            "agent_9 is outside a population of 4 agents"
        );
    }
}
