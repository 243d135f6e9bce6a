//! Metrics System
//!
//! Append-only time series of per-round counts.

use bevy_ecs::prelude::*;
use tracing::debug;

use rumor_events::RoundMetrics;

use crate::components::{KnowledgeState, RoundClock};

/// Resource accumulating one [`RoundMetrics`] per round.
#[derive(Resource, Debug, Clone, Default)]
pub struct MetricsRecorder {
    series: Vec<RoundMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the counts of `state` as the entry for `round`.
    pub fn record(&mut self, round: u64, state: &KnowledgeState) -> &RoundMetrics {
        let depth = state.depth();
        self.series.push(RoundMetrics {
            round,
            heard: state.heard_count(),
            attained: (0..depth).map(|level| state.attained_count(level)).collect(),
        });
        &self.series[self.series.len() - 1]
    }

    pub fn series(&self) -> &[RoundMetrics] {
        &self.series
    }

    pub fn latest(&self) -> Option<&RoundMetrics> {
        self.series.last()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Rounds executed after seeding.
    pub fn rounds(&self) -> u64 {
        self.latest().map(|m| m.round).unwrap_or(0)
    }

    pub fn heard_series(&self) -> Vec<usize> {
        self.series.iter().map(|m| m.heard).collect()
    }

    pub fn attained_series(&self, level: usize) -> Vec<usize> {
        self.series.iter().map(|m| m.attained_at(level)).collect()
    }

    /// First round in which `count` reached `target`.
    pub fn first_round_where(&self, target: usize, count: impl Fn(&RoundMetrics) -> usize) -> Option<u64> {
        self.series
            .iter()
            .find(|m| count(m) >= target)
            .map(|m| m.round)
    }
}

/// System recording the committed state after each round.
pub fn record_metrics(
    state: Res<KnowledgeState>,
    clock: Res<RoundClock>,
    mut recorder: ResMut<MetricsRecorder>,
) {
    let metrics = recorder.record(clock.round, &state);
    debug!(
        round = metrics.round,
        heard = metrics.heard,
        attained = ?metrics.attained,
        "metrics recorded"
    );
}
