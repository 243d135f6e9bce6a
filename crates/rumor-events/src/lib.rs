//! Shared data types for the rumor simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is what a visualizer or an analysis script reads back from a run.

pub mod agent;
pub mod metrics;
pub mod report;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use agent::AgentId;
pub use metrics::RoundMetrics;
pub use report::{generate_report_id, RunOutcome, RunReport, RunSettings};
pub use snapshot::{AgentSnapshot, GraphSnapshot};
