//! Run Reports
//!
//! The complete result of one simulation run: the settings it ran with, how
//! it ended, the metric series, and final per-agent knowledge.

use serde::{Deserialize, Serialize};

use crate::{AgentId, AgentSnapshot, GraphSnapshot, RoundMetrics};

/// Generates a report ID with the given sequence number.
pub fn generate_report_id(sequence: u64) -> String {
    format!("run_{:04}", sequence)
}

/// Parameters a run was started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    pub agent_count: usize,
    pub connectivity: usize,
    pub knowledge_depth: usize,
    /// Seed of the graph and origin draw. Absent for hand-built graphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub origin: AgentId,
}

/// How a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every agent holds the deepest knowledge level.
    Terminated { rounds: u64 },
    /// A round changed nothing; the top level can never become universal.
    Stalled { rounds: u64 },
    /// The caller's round bound was reached first.
    RoundLimit { rounds: u64 },
    /// A round failed and the run was stopped.
    Aborted { rounds: u64 },
}

impl RunOutcome {
    /// Rounds executed before stopping.
    pub fn rounds(&self) -> u64 {
        match *self {
            RunOutcome::Terminated { rounds }
            | RunOutcome::Stalled { rounds }
            | RunOutcome::RoundLimit { rounds }
            | RunOutcome::Aborted { rounds } => rounds,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, RunOutcome::Terminated { .. })
    }
}

/// Everything a visualizer needs from a finished (or interrupted) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub report_id: String,
    pub settings: RunSettings,
    pub outcome: RunOutcome,
    /// One entry per round, starting with the seeded state at round 0.
    pub metrics: Vec<RoundMetrics>,
    pub agents: Vec<AgentSnapshot>,
    pub graph: GraphSnapshot,
}

impl RunReport {
    /// Number of agents that had heard the rumor, per round.
    pub fn heard_series(&self) -> Vec<usize> {
        self.metrics.iter().map(|m| m.heard).collect()
    }

    /// Number of agents holding `level`, per round.
    pub fn attained_series(&self, level: usize) -> Vec<usize> {
        self.metrics.iter().map(|m| m.attained_at(level)).collect()
    }

    /// Parse a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
