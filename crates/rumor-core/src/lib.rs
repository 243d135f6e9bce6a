//! Rumor propagation with common-knowledge escalation.
//!
//! A rumor spreads over a random contact graph in synchronous rounds. Each
//! agent tracks, per knowledge level, which agents it can vouch for: level 0
//! is who has heard, level 1 is who knows that everyone has heard, and so on.
//! A run ends when every agent holds the deepest configured level.

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{default_config_toml, ConfigError, ConfigFile, ExperimentConfig, SimConfig};
pub use error::SimError;
pub use simulation::Simulator;
pub use systems::MetricsRecorder;

pub use rumor_events::{AgentId, AgentSnapshot, RoundMetrics, RunOutcome, RunReport};
