//! Debt Projection - monthly debt paydown and interest engine
//!
//! This library provides:
//! - Monthly debt series under a fixed paydown, across several fixed-rate scenarios
//! - Banded (stacked) interest decomposition with a consistency check
//! - Debt-quantile crossing and life-event reference markers
//! - Batch projections and CSV/JSON export

pub mod assumptions;
pub mod error;
pub mod inputs;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Assumptions, LifetimeAssumptions, RateScenarios};
pub use error::{Error, Result};
pub use inputs::{InputSet, ProjectionInputs};
pub use projection::{
    project, Bucket, ConsistencyWarning, ProjectionEngine, ProjectionResult, ReferenceMarker,
    TimeSeries,
};
pub use scenario::ScenarioRunner;
