//! Termination System
//!
//! Decides after each round whether the run is done.

use bevy_ecs::prelude::*;
use tracing::{debug, info, warn};

use crate::components::{KnowledgeState, RoundClock, RunStatus, SimPhase};

/// Phase implied by the committed state after a round.
///
/// `previous_progress` is [`KnowledgeState::progress`] before the round. An
/// unchanged measure means the round was a fixed point of the update rule.
pub fn evaluate_phase(state: &KnowledgeState, previous_progress: usize) -> SimPhase {
    if state.is_complete() {
        SimPhase::Terminated
    } else if state.progress() == previous_progress {
        SimPhase::Stalled
    } else {
        SimPhase::Running
    }
}

pub fn check_termination(
    state: Res<KnowledgeState>,
    clock: Res<RoundClock>,
    mut status: ResMut<RunStatus>,
) {
    if status.phase.is_finished() {
        return;
    }

    let phase = evaluate_phase(&state, status.progress);
    status.progress = state.progress();
    status.phase = phase;

    match phase {
        SimPhase::Terminated => {
            info!(round = clock.round, depth = state.depth(), "every agent holds the deepest level");
        }
        SimPhase::Stalled => {
            warn!(
                round = clock.round,
                heard = state.heard_count(),
                agents = state.agent_count(),
                "no progress in the last round; the run cannot terminate"
            );
        }
        SimPhase::Running => {
            debug!(
                round = clock.round,
                touched = clock.last_touched,
                progress = status.progress,
                "round made progress"
            );
        }
        SimPhase::Seeded | SimPhase::Aborted => {}
    }
}
