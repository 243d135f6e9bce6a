//! Simulator
//!
//! Owns one run: the ECS world holding graph, knowledge and metrics, and the
//! per-round schedule `propagate_round -> record_metrics -> check_termination`.
//!
//! A run on a disconnected graph cannot terminate. It ends in
//! [`SimPhase::Stalled`] as soon as a round changes nothing, instead of
//! looping forever.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use tracing::info;

use rumor_events::{
    generate_report_id, AgentId, AgentSnapshot, RoundMetrics, RunOutcome, RunReport, RunSettings,
};

use crate::components::{ContactGraph, KnowledgeState, RoundClock, RunStatus, SimPhase};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::setup::build_population;
use crate::systems::{check_termination, propagate_round, record_metrics, MetricsRecorder};

pub struct Simulator {
    world: World,
    schedule: Schedule,
    origin: AgentId,
    seed: Option<u64>,
}

impl Simulator {
    /// Build a random population from `config` and seed the rumor.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let population = build_population(config)?;
        let mut simulator =
            Self::from_parts(population.graph, config.knowledge_depth, population.origin)?;
        simulator.seed = Some(population.seed);
        Ok(simulator)
    }

    /// Seed the rumor at `origin` on a caller-supplied graph.
    pub fn from_parts(
        graph: ContactGraph,
        knowledge_depth: usize,
        origin: AgentId,
    ) -> Result<Self, SimError> {
        let mut state = KnowledgeState::new(graph.agent_count(), knowledge_depth)?;
        state.seed(origin)?;

        let mut recorder = MetricsRecorder::new();
        recorder.record(0, &state);

        let mut status = RunStatus::new(state.progress());
        if state.is_complete() {
            status.phase = SimPhase::Terminated;
        }
        info!(
            agents = graph.agent_count(),
            depth = knowledge_depth,
            %origin,
            phase = ?status.phase,
            "rumor seeded"
        );

        let mut world = World::new();
        world.insert_resource(graph);
        world.insert_resource(state);
        world.insert_resource(recorder);
        world.insert_resource(RoundClock::default());
        world.insert_resource(status);

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((propagate_round, record_metrics, check_termination).chain());

        Ok(Self {
            world,
            schedule,
            origin,
            seed: None,
        })
    }

    pub fn phase(&self) -> SimPhase {
        self.world.resource::<RunStatus>().phase
    }

    /// Rounds executed so far.
    pub fn round(&self) -> u64 {
        self.world.resource::<RoundClock>().round
    }

    pub fn origin(&self) -> AgentId {
        self.origin
    }

    /// Seed the population was drawn with, if it was drawn at random.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn graph(&self) -> &ContactGraph {
        self.world.resource::<ContactGraph>()
    }

    pub fn state(&self) -> &KnowledgeState {
        self.world.resource::<KnowledgeState>()
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        self.world.resource::<MetricsRecorder>()
    }

    pub fn series(&self) -> &[RoundMetrics] {
        self.metrics().series()
    }

    pub fn agent_snapshots(&self) -> Vec<AgentSnapshot> {
        self.state().agent_snapshots()
    }

    /// Run one round. Does nothing once the run has finished.
    pub fn step(&mut self) -> SimPhase {
        if !self.phase().is_finished() {
            self.schedule.run(&mut self.world);
        }
        self.phase()
    }

    /// Run until every agent holds the deepest level or the run stalls.
    pub fn run(&mut self) -> RunOutcome {
        while !self.step().is_finished() {}
        self.outcome()
    }

    /// Like [`Simulator::run`], but stop after at most `max_rounds` more rounds.
    pub fn run_for(&mut self, max_rounds: u64) -> RunOutcome {
        for _ in 0..max_rounds {
            if self.step().is_finished() {
                break;
            }
        }
        self.outcome()
    }

    /// Run to completion, honoring the config's optional round bound.
    pub fn run_with_limit(&mut self, max_rounds: Option<u64>) -> RunOutcome {
        match max_rounds {
            Some(limit) => self.run_for(limit),
            None => self.run(),
        }
    }

    /// How the run stands right now.
    pub fn outcome(&self) -> RunOutcome {
        let rounds = self.round();
        match self.phase() {
            SimPhase::Terminated => RunOutcome::Terminated { rounds },
            SimPhase::Stalled => RunOutcome::Stalled { rounds },
            SimPhase::Aborted => RunOutcome::Aborted { rounds },
            SimPhase::Seeded | SimPhase::Running => RunOutcome::RoundLimit { rounds },
        }
    }

    /// Whether the committed state satisfies the termination predicate.
    pub fn is_complete(&self) -> bool {
        self.state().is_complete()
    }

    pub fn settings(&self) -> RunSettings {
        let graph = self.graph();
        RunSettings {
            agent_count: graph.agent_count(),
            connectivity: graph.connectivity(),
            knowledge_depth: self.state().depth(),
            seed: self.seed,
            origin: self.origin,
        }
    }

    /// Everything a visualizer needs, tagged with `sequence`.
    pub fn report(&self, sequence: u64) -> RunReport {
        RunReport {
            report_id: generate_report_id(sequence),
            settings: self.settings(),
            outcome: self.outcome(),
            metrics: self.series().to_vec(),
            agents: self.agent_snapshots(),
            graph: self.graph().to_snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> ContactGraph {
        ContactGraph::from_edges(2, [(AgentId(0), AgentId(1))]).unwrap()
    }

    #[test]
    fn test_from_parts_records_round_zero() {
        let sim = Simulator::from_parts(pair(), 1, AgentId(0)).unwrap();

        assert_eq!(sim.phase(), SimPhase::Seeded);
        assert_eq!(sim.round(), 0);
        assert_eq!(sim.series().len(), 1);
        assert_eq!(sim.series()[0].heard, 1);
        assert!(sim.seed().is_none());
    }

    #[test]
    fn test_rejects_zero_depth() {
        assert_eq!(
            Simulator::from_parts(pair(), 0, AgentId(0)).err(),
            Some(SimError::InvalidDepth(0))
        );
    }

    #[test]
    fn test_rejects_origin_outside_graph() {
        assert!(matches!(
            Simulator::from_parts(pair(), 1, AgentId(2)),
            Err(SimError::UnknownAgent { .. })
        ));
    }

    #[test]
    fn test_step_advances_one_round() {
        let mut sim = Simulator::from_parts(pair(), 1, AgentId(0)).unwrap();

        assert_eq!(sim.step(), SimPhase::Running);
        assert_eq!(sim.round(), 1);
        assert_eq!(sim.series().len(), 2);
    }

    #[test]
    fn test_finished_run_does_not_step() {
        let mut sim = Simulator::from_parts(pair(), 1, AgentId(0)).unwrap();
        let outcome = sim.run();
        assert!(outcome.is_terminated());

        let rounds = sim.round();
        assert_eq!(sim.step(), SimPhase::Terminated);
        assert_eq!(sim.round(), rounds);
        assert_eq!(sim.series().len() as u64, rounds + 1);
    }

    #[test]
    fn test_run_for_respects_limit() {
        let mut sim = Simulator::from_parts(pair(), 1, AgentId(0)).unwrap();
        assert_eq!(sim.run_for(1), RunOutcome::RoundLimit { rounds: 1 });
        assert_eq!(sim.run_with_limit(Some(10)), RunOutcome::Terminated { rounds: 2 });
    }

    #[test]
    fn test_new_records_seed() {
        let config = SimConfig {
            random_seed: Some(11),
            ..SimConfig::default()
        };
        let sim = Simulator::new(&config).unwrap();
        assert_eq!(sim.seed(), Some(11));
        assert_eq!(sim.settings().agent_count, config.agent_count);
        assert_eq!(sim.settings().connectivity, config.connectivity);
    }

    #[test]
    fn test_report_contents() {
        let mut sim = Simulator::from_parts(pair(), 1, AgentId(1)).unwrap();
        sim.run();

        let report = sim.report(3);
        assert_eq!(report.report_id, "run_0003");
        assert_eq!(report.settings.origin, AgentId(1));
        assert_eq!(report.outcome, RunOutcome::Terminated { rounds: 2 });
        assert_eq!(report.metrics.len(), 3);
        assert_eq!(report.agents.len(), 2);
        assert_eq!(report.graph.edges, vec![(AgentId(0), AgentId(1))]);
    }
}
