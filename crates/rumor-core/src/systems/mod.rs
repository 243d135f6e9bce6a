//! ECS Systems
//!
//! A round runs propagation, metrics recording and the termination check,
//! in that order.

pub mod metrics;
pub mod propagation;
pub mod termination;

pub use metrics::{record_metrics, MetricsRecorder};
pub use propagation::{advance, apply_contacts, contact_pairs, propagate_round};
pub use termination::{check_termination, evaluate_phase};
