//! Propagation System
//!
//! One synchronous round of contact-based diffusion: every agent that has
//! heard the rumor contacts each of its neighbors once, all contacts are
//! staged, and only then is the round committed.

use bevy_ecs::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, error};

use rumor_events::AgentId;

use crate::components::{ContactGraph, KnowledgeState, RoundClock, RunStatus, SimPhase};
use crate::error::SimError;

/// Directed `(receiver, sender)` contacts of the coming round.
///
/// Senders are the agents that had heard the rumor when the round began.
pub fn contact_pairs(graph: &ContactGraph, state: &KnowledgeState) -> Vec<(AgentId, AgentId)> {
    state
        .informed()
        .into_iter()
        .flat_map(move |sender| {
            graph
                .neighbors(sender)
                .iter()
                .map(move |&receiver| (receiver, sender))
        })
        .collect()
}

/// Stage the given contacts in order and commit them as one round.
///
/// The result does not depend on the order of `pairs`.
pub fn apply_contacts(
    state: &mut KnowledgeState,
    pairs: &[(AgentId, AgentId)],
) -> Result<BTreeSet<AgentId>, SimError> {
    let mut touched = BTreeSet::new();

    for &(receiver, sender) in pairs {
        state.stage_contact(receiver, sender)?;
        touched.insert(receiver);
    }
    state.commit(touched.iter().copied())?;

    Ok(touched)
}

/// Run one round over `graph`, returning the agents that were contacted.
pub fn advance(
    graph: &ContactGraph,
    state: &mut KnowledgeState,
) -> Result<BTreeSet<AgentId>, SimError> {
    let pairs = contact_pairs(graph, state);
    apply_contacts(state, &pairs)
}

/// System wrapper around [`advance`].
pub fn propagate_round(
    graph: Res<ContactGraph>,
    mut state: ResMut<KnowledgeState>,
    mut clock: ResMut<RoundClock>,
    mut status: ResMut<RunStatus>,
) {
    clock.advance();

    match advance(&graph, &mut state) {
        Ok(touched) => {
            clock.last_touched = touched.len();
            debug!(round = clock.round, touched = touched.len(), "round propagated");
        }
        Err(e) => {
            state.discard_pending();
            clock.last_touched = 0;
            status.phase = SimPhase::Aborted;
            error!(round = clock.round, "round could not be propagated, stopping: {}", e);
        }
    }
}
