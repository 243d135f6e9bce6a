//! Population Setup
//!
//! Draws the contact graph and the rumor's origin from one seeded RNG.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use rumor_events::AgentId;

use crate::components::ContactGraph;
use crate::config::SimConfig;
use crate::error::SimError;

/// Graph and origin for one run, plus the seed that reproduces them.
#[derive(Debug, Clone)]
pub struct Population {
    pub graph: ContactGraph,
    pub origin: AgentId,
    pub seed: u64,
}

/// The configured seed, or a fresh one so the run can still be reproduced.
pub fn resolve_seed(config: &SimConfig) -> u64 {
    config.random_seed.unwrap_or_else(rand::random::<u64>)
}

/// Build the population described by `config`.
pub fn build_population(config: &SimConfig) -> Result<Population, SimError> {
    let seed = resolve_seed(config);
    let mut rng = SmallRng::seed_from_u64(seed);

    let graph = ContactGraph::generate(config.agent_count, config.connectivity, &mut rng)?;
    let origin = AgentId::from_index(rng.gen_range(0..graph.agent_count()));

    info!(
        seed,
        agents = graph.agent_count(),
        connectivity = graph.connectivity(),
        edges = graph.edge_count(),
        %origin,
        "population built"
    );
    let components = graph.component_count();
    if components > 1 {
        warn!(components, "contact graph is disconnected; the rumor cannot reach everyone");
    }

    Ok(Population { graph, origin, seed })
}
