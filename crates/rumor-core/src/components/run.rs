//! Run-level resources: the round counter and the simulator's phase.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimPhase {
    /// Origin seeded, no round executed yet.
    Seeded,
    Running,
    /// Every agent holds the deepest knowledge level.
    Terminated,
    /// The last round changed nothing; the run can never terminate.
    Stalled,
    /// A round could not be propagated; its staged evidence was dropped.
    Aborted,
}

impl SimPhase {
    /// Whether further rounds would be executed.
    pub fn is_finished(self) -> bool {
        matches!(self, SimPhase::Terminated | SimPhase::Stalled | SimPhase::Aborted)
    }
}

/// Discrete round counter. Round 0 is the seeded state.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundClock {
    pub round: u64,
    /// Agents contacted during the latest round.
    pub last_touched: usize,
}

impl RoundClock {
    pub fn advance(&mut self) {
        self.round += 1;
    }
}

/// Phase plus the progress measure it was last judged on.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct RunStatus {
    pub phase: SimPhase,
    pub progress: usize,
}

impl RunStatus {
    pub fn new(progress: usize) -> Self {
        Self {
            phase: SimPhase::Seeded,
            progress,
        }
    }
}
