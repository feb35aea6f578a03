//! Projection pipeline: base series, banded interest, reference markers

pub mod calendar;
mod derived;
mod engine;
pub mod export;
mod markers;
mod result;
mod series;

pub use derived::{ConsistencyWarning, DerivedMetricsCalculator};
pub use engine::{Horizon, ProjectionEngine};
pub use markers::{LifeEvent, ReferenceMarker, ReferenceMarkerCalculator};
pub use result::{ProjectionResult, ProjectionSummary, RateSummary};
pub use series::{monthly_interest, Bucket, RateMetrics, TimeSeries};

use crate::assumptions::Assumptions;
use crate::inputs::ProjectionInputs;

/// Project one set of inputs under the given assumptions
///
/// Pure: the same arguments always give the same result.
pub fn project(inputs: &ProjectionInputs, assumptions: &Assumptions) -> ProjectionResult {
    ProjectionEngine::new(assumptions.clone()).project(inputs)
}
