//! Run Setup
//!
//! Graph construction and origin selection.

pub mod population;

pub use population::*;
