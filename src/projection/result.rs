//! Projection output and summary statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::derived::ConsistencyWarning;
use super::markers::ReferenceMarker;
use super::series::TimeSeries;
use crate::inputs::ProjectionInputs;

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Inputs the projection was run with
    pub inputs: ProjectionInputs,

    /// Monthly buckets with banded interest filled in
    pub series: TimeSeries,

    /// Quantile crossings and life events
    pub markers: Vec<ReferenceMarker>,

    /// Buckets whose band stack did not add up
    pub diagnostics: Vec<ConsistencyWarning>,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let series = &self.series;
        let last = series.last();

        let rates = series
            .rates
            .iter()
            .enumerate()
            .map(|(k, &rate)| {
                let (total_interest, total_interest_no_paydown) = last
                    .and_then(|b| b.rate(k))
                    .map(|m| (m.cumulative_interest, m.cumulative_interest_no_paydown))
                    .unwrap_or((0.0, 0.0));
                RateSummary {
                    rate,
                    total_interest,
                    total_interest_no_paydown,
                    interest_avoided: total_interest_no_paydown - total_interest,
                }
            })
            .collect();

        // Axis bound over every numeric value of the last bucket
        let chart_ceiling = last
            .map(|b| b.values().fold(f64::NEG_INFINITY, f64::max).ceil())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        ProjectionSummary {
            total_months: series.len() as u32,
            start_date: series.first().map(|b| b.date),
            final_date: last.map(|b| b.date),
            final_debt: last.map(|b| b.debt).unwrap_or(0.0),
            total_down_payment: last.map(|b| b.cumulative_down_payment).unwrap_or(0.0),
            rates,
            chart_ceiling,
            marker_count: self.markers.len(),
            warning_count: self.diagnostics.len(),
        }
    }
}

/// Totals for one rate scenario over the whole series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    pub rate: f64,
    pub total_interest: f64,
    pub total_interest_no_paydown: f64,
    /// Interest saved by paying down versus never paying down
    pub interest_avoided: f64,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub start_date: Option<NaiveDate>,
    pub final_date: Option<NaiveDate>,
    pub final_debt: f64,
    pub total_down_payment: f64,
    pub rates: Vec<RateSummary>,
    pub chart_ceiling: f64,
    pub marker_count: usize,
    pub warning_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Assumptions, RateScenarios};
    use crate::projection::ProjectionEngine;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_summary_small_projection() {
        let engine = ProjectionEngine::new(Assumptions::with_rates(
            RateScenarios::new(vec![0.06, 0.12]).unwrap(),
        ));
        // 3 months: debt 1200, 800, 400
        let inputs = ProjectionInputs::new(1_200.0, 1_200.0, 40.0, 65.0, 400.0, as_of());
        let summary = engine.project(&inputs).summary();

        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.start_date, Some(as_of()));
        assert_eq!(summary.final_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(summary.final_debt, 400.0);
        assert_eq!(summary.total_down_payment, 1_200.0);

        // 6%: 6 + 4 + 2 vs 3 * 6
        assert_eq!(summary.rates[0].total_interest, 12.0);
        assert_eq!(summary.rates[0].total_interest_no_paydown, 18.0);
        assert_eq!(summary.rates[0].interest_avoided, 6.0);
        // 12%: 12 + 8 + 4 vs 3 * 12
        assert_eq!(summary.rates[1].total_interest, 24.0);
        assert_eq!(summary.rates[1].total_interest_no_paydown, 36.0);

        // Largest last-bucket value is the cumulative down payment
        assert_eq!(summary.chart_ceiling, 1_200.0);
    }

    #[test]
    fn test_summary_of_empty_projection() {
        let engine = ProjectionEngine::default();
        let inputs = ProjectionInputs::new(1.0, 1.0, 40.0, 65.0, f64::NAN, as_of());
        let result = engine.project(&inputs);
        let summary = result.summary();

        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.final_date, None);
        assert_eq!(summary.final_debt, 0.0);
        assert_eq!(summary.rates.len(), 7);
        assert!(summary.rates.iter().all(|r| r.total_interest == 0.0));
        assert_eq!(summary.chart_ceiling, 0.0);
        assert_eq!(summary.warning_count, 0);
    }
}
