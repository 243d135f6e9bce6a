//! Output Module
//!
//! JSON reports and text summaries for finished runs.

pub mod report;

pub use report::*;
