//! Readiness evaluation
//!
//! Two-phase pattern matching the rest of the crate:
//! 1. Gather - fetch PR metadata and signals (effectful, concurrent)
//! 2. Compute - evaluate gates and synthesize the chart (pure, testable)

mod gather;
mod snapshot;

pub use gather::{EvaluateOptions, Evaluation, evaluate, gather_inputs};
pub use snapshot::{GateInputs, GateResults, ReadinessSnapshot};
