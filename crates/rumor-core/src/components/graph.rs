//! Contact Graph
//!
//! The fixed, undirected contact relation between agents. Built once per run
//! and never mutated afterwards.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, VecDeque};

use rumor_events::{AgentId, GraphSnapshot};

use crate::error::SimError;

static NO_NEIGHBORS: BTreeSet<AgentId> = BTreeSet::new();

/// Undirected contact graph over agents `0..agent_count`.
///
/// Built from independent random draws, so an agent may be drawn as its own
/// contact and the same pair may be drawn twice. Duplicates collapse in the
/// adjacency sets; self-loops are kept, so an agent can be its own neighbor.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ContactGraph {
    adjacency: Vec<BTreeSet<AgentId>>,
    /// Random contact draws per agent; zero for hand-built graphs.
    connectivity: usize,
}

impl ContactGraph {
    /// Build a random graph, deterministic in `seed`.
    pub fn build(agent_count: usize, connectivity: usize, seed: u64) -> Result<Self, SimError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::generate(agent_count, connectivity, &mut rng)
    }

    /// Build a random graph drawing from a caller-owned RNG.
    ///
    /// Every agent draws `connectivity` contacts uniformly from the whole
    /// population, itself included.
    pub fn generate<R: Rng + ?Sized>(
        agent_count: usize,
        connectivity: usize,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let mut graph = Self::empty(agent_count)?;
        graph.connectivity = connectivity;

        for agent in 0..agent_count {
            for _ in 0..connectivity {
                let contact = rng.gen_range(0..agent_count);
                graph.connect(agent, contact);
            }
        }

        Ok(graph)
    }

    /// Build a graph from an explicit edge list.
    pub fn from_edges(
        agent_count: usize,
        edges: impl IntoIterator<Item = (AgentId, AgentId)>,
    ) -> Result<Self, SimError> {
        let mut graph = Self::empty(agent_count)?;

        for (a, b) in edges {
            for endpoint in [a, b] {
                if endpoint.index() >= agent_count {
                    return Err(SimError::UnknownAgent {
                        agent: endpoint,
                        agent_count,
                    });
                }
            }
            graph.connect(a.index(), b.index());
        }

        Ok(graph)
    }

    fn empty(agent_count: usize) -> Result<Self, SimError> {
        if agent_count == 0 {
            return Err(SimError::InvalidConfig(
                "agent count must be positive".to_string(),
            ));
        }
        if u32::try_from(agent_count).is_err() {
            return Err(SimError::InvalidConfig(format!(
                "agent count {} exceeds the supported maximum of {}",
                agent_count,
                u32::MAX
            )));
        }

        Ok(Self {
            adjacency: vec![BTreeSet::new(); agent_count],
            connectivity: 0,
        })
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.adjacency[a].insert(AgentId::from_index(b));
        self.adjacency[b].insert(AgentId::from_index(a));
    }

    pub fn agent_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn connectivity(&self) -> usize {
        self.connectivity
    }

    /// All agents in id order.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.adjacency.len()).map(AgentId::from_index)
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.adjacency.len()
    }

    /// Contacts of `agent`; empty for agents outside the graph.
    pub fn neighbors(&self, agent: AgentId) -> &BTreeSet<AgentId> {
        self.adjacency.get(agent.index()).unwrap_or(&NO_NEIGHBORS)
    }

    pub fn degree(&self, agent: AgentId) -> usize {
        self.neighbors(agent).len()
    }

    /// Each undirected edge once, smaller endpoint first.
    pub fn edges(&self) -> Vec<(AgentId, AgentId)> {
        self.agents()
            .flat_map(move |a| self.neighbors(a).range(a..).map(move |&b| (a, b)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        let mut visited = vec![false; self.adjacency.len()];
        let mut components = 0;

        for start in 0..self.adjacency.len() {
            if visited[start] {
                continue;
            }
            components += 1;
            visited[start] = true;

            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for next in &self.adjacency[current] {
                    if !visited[next.index()] {
                        visited[next.index()] = true;
                        queue.push_back(next.index());
                    }
                }
            }
        }

        components
    }

    /// Whether the rumor can reach every agent from any origin.
    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }

    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            agent_count: self.agent_count(),
            edges: self.edges(),
        }
    }
}
