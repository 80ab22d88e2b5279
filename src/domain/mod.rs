//! Domain layer containing the assessment logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `dimensions` - The scoring space: RIASEC axes, motivators, interests
//! - `journey` - The journey aggregate and its lifecycle
//! - `assessment` - Pure per-turn services (accumulate, score, decide, synthesize)

pub mod assessment;
pub mod dimensions;
pub mod foundation;
pub mod journey;
