//! End-to-end runs on small hand-built topologies.

use rumor_core::{AgentId, ContactGraph, RunOutcome, SimError, SimPhase, Simulator};

fn graph(n: usize, edges: &[(u32, u32)]) -> ContactGraph {
    ContactGraph::from_edges(n, edges.iter().map(|&(a, b)| (AgentId(a), AgentId(b)))).unwrap()
}

fn ring(n: u32) -> ContactGraph {
    ContactGraph::from_edges(n as usize, (0..n).map(|i| (AgentId(i), AgentId((i + 1) % n))))
        .unwrap()
}

/// A lone agent knows everything the moment it is seeded.
#[test]
fn test_single_agent_terminates_at_round_zero() {
    for connectivity in 0..3 {
        let graph = ContactGraph::build(1, connectivity, 3).unwrap();
        let mut sim = Simulator::from_parts(graph, 1, AgentId(0)).unwrap();

        assert_eq!(sim.phase(), SimPhase::Terminated);
        assert!(sim.state().attained(AgentId(0), 0));
        assert_eq!(sim.run(), RunOutcome::Terminated { rounds: 0 });
        assert_eq!(sim.series().len(), 1);
    }
}

/// Deeper levels need a contact, which a self-loop provides.
#[test]
fn test_single_agent_with_self_loop_reaches_depth_two() {
    let mut sim = Simulator::from_parts(graph(1, &[(0, 0)]), 2, AgentId(0)).unwrap();
    assert_eq!(sim.run(), RunOutcome::Terminated { rounds: 1 });
}

#[test]
fn test_two_agents() {
    let mut sim = Simulator::from_parts(graph(2, &[(0, 1)]), 1, AgentId(0)).unwrap();

    sim.step();
    let state = sim.state();
    assert!(state.has_heard(AgentId(1)));
    assert_eq!(
        state.evidence(AgentId(1), 0).iter().copied().collect::<Vec<_>>(),
        vec![AgentId(0), AgentId(1)]
    );
    assert!(state.attained(AgentId(1), 0));
    // Agent 0 only learns about agent 1 once agent 1 starts sending.
    assert!(!state.attained(AgentId(0), 0));
    assert_eq!(sim.phase(), SimPhase::Running);

    assert_eq!(sim.run(), RunOutcome::Terminated { rounds: 2 });
    assert!(sim.state().attained(AgentId(0), 0));
}

#[test]
fn test_ring_of_four_at_depth_two() {
    let mut sim = Simulator::from_parts(ring(4), 2, AgentId(0)).unwrap();
    let outcome = sim.run();

    assert_eq!(outcome, RunOutcome::Terminated { rounds: 7 });

    let metrics = sim.metrics();
    assert_eq!(metrics.heard_series(), vec![1, 3, 4, 4, 4, 4, 4, 4]);
    assert_eq!(metrics.attained_series(0), vec![0, 0, 1, 3, 4, 4, 4, 4]);
    assert_eq!(metrics.attained_series(1), vec![0, 0, 0, 0, 0, 1, 3, 4]);

    let heard_all = metrics.first_round_where(4, |m| m.heard).unwrap();
    let level0_all = metrics.first_round_where(4, |m| m.attained_at(0)).unwrap();
    let level1_all = metrics.first_round_where(4, |m| m.attained_at(1)).unwrap();
    assert_eq!((heard_all, level0_all, level1_all), (2, 4, 7));
    assert!(heard_all < level0_all && level0_all < level1_all);

    // Round 0 plus one entry per executed round.
    assert_eq!(metrics.len() as u64, outcome.rounds() + 1);
}

#[test]
fn test_ring_matches_fixture_report() {
    let mut sim = Simulator::from_parts(ring(4), 2, AgentId(0)).unwrap();
    sim.run();

    let expected = rumor_events::fixtures::sample_report();
    let report = sim.report(1);
    assert_eq!(report, expected);
}

#[test]
fn test_line_of_five_at_depth_three() {
    let line = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let mut sim = Simulator::from_parts(line, 3, AgentId(0)).unwrap();

    assert_eq!(sim.run(), RunOutcome::Terminated { rounds: 18 });
    assert_eq!(sim.metrics().first_round_where(5, |m| m.heard), Some(4));
}

#[test]
fn test_disconnected_graph_stalls() {
    let split = graph(4, &[(0, 1), (2, 3)]);
    let mut sim = Simulator::from_parts(split, 1, AgentId(0)).unwrap();

    let outcome = sim.run();
    assert_eq!(outcome, RunOutcome::Stalled { rounds: 3 });
    assert_eq!(sim.phase(), SimPhase::Stalled);
    assert!(!sim.is_complete());

    let last = sim.metrics().latest().unwrap();
    assert_eq!(last.heard, 2);
    assert_eq!(last.attained_at(0), 0);
    assert!(!sim.state().has_heard(AgentId(2)));
}

#[test]
fn test_isolated_agents_stall_after_one_round() {
    let graph = ContactGraph::build(3, 0, 1).unwrap();
    let mut sim = Simulator::from_parts(graph, 2, AgentId(1)).unwrap();
    assert_eq!(sim.run(), RunOutcome::Stalled { rounds: 1 });
}

#[test]
fn test_stalled_run_is_reported_not_raised() {
    let split = graph(4, &[(0, 1), (2, 3)]);
    let mut sim = Simulator::from_parts(split, 2, AgentId(3)).unwrap();
    sim.run();

    let report = sim.report(1);
    assert!(matches!(report.outcome, RunOutcome::Stalled { .. }));
    assert!(report.agents.iter().filter(|a| a.heard).count() == 2);
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(
        ContactGraph::build(0, 1, 1),
        Err(SimError::InvalidConfig(_))
    ));
    assert_eq!(
        Simulator::from_parts(ring(3), 0, AgentId(0)).err(),
        Some(SimError::InvalidDepth(0))
    );
}
