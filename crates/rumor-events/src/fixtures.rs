//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // rumor-events = { path = "../rumor-events", features = ["test-fixtures"] }
//!
//! use rumor_events::fixtures;
//!
//! let report = fixtures::sample_report();
//! ```

use crate::RunReport;

/// Returns a sample report from the fixtures file.
///
/// A 4-agent ring (0-1-2-3-0) at knowledge depth 2, rumor seeded at agent 0:
/// - everyone has heard by round 2
/// - level 0 is universal at round 4
/// - level 1 is universal at round 7, where the run terminates
pub fn sample_report() -> RunReport {
    let json = include_str!("../tests/fixtures/ring_report.json");
    RunReport::from_json(json).expect("Failed to parse ring_report.json")
}
