//! Simulation Components
//!
//! The contact graph, per-agent knowledge, and run bookkeeping, all stored
//! as ECS resources.

pub mod graph;
pub mod knowledge;
pub mod run;

pub use graph::ContactGraph;
pub use knowledge::{AgentKnowledge, KnowledgeState, LevelKnowledge};
pub use run::{RoundClock, RunStatus, SimPhase};
