//! ready-or-not - merge-readiness gates for GitHub pull requests
//!
//! Evaluates a fixed set of independent readiness gates (branch currency, CI
//! checks, review threads, reviewer count, draft status) and renders the
//! result as a Mermaid decision flowchart showing which gate blocks merge and
//! what resolves it.
//!
//! The gate evaluators, the composite gate and chart synthesis are pure;
//! only [`evaluate::evaluate`] talks to the platform.

pub mod auth;
pub mod chart;
pub mod comment;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod gates;
pub mod platform;
pub mod types;
