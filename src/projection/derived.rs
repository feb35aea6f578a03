//! Banded interest decomposition and its consistency check
//!
//! Each scenario's band is the gap between its cumulative interest and the
//! next lower scenario's, so stacking the bands in ascending rate order
//! rebuilds the highest-rate cumulative curve. The two values are computed
//! by different summation orders; any disagreement beyond the tolerance is
//! reported, never corrected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{Bucket, TimeSeries};

/// Band stack of one bucket does not add up to the top cumulative curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyWarning {
    pub bucket_index: usize,
    pub date: NaiveDate,
    /// Bands summed in ascending rate order
    pub banded_sum: f64,
    /// Cumulative interest of the highest rate
    pub cumulative_interest: f64,
    /// `banded_sum - cumulative_interest`
    pub discrepancy: f64,
}

/// Fills `banded_interest` and checks the stack per bucket
#[derive(Debug, Clone, Copy)]
pub struct DerivedMetricsCalculator {
    /// Relative tolerance of the band-stack check
    tolerance: f64,
}

impl DerivedMetricsCalculator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Take the base series and return it with bands filled in, plus any warnings
    pub fn apply(&self, series: TimeSeries) -> (TimeSeries, Vec<ConsistencyWarning>) {
        let TimeSeries { rates, buckets } = series;
        let mut diagnostics = Vec::new();

        let buckets = buckets
            .into_iter()
            .map(|bucket| {
                let bucket = with_bands(bucket);
                if let Some(warning) = self.check(&bucket) {
                    log::warn!(
                        "band sum mismatch at bucket {} ({}): {} vs {} (diff {})",
                        warning.bucket_index,
                        warning.date,
                        warning.banded_sum,
                        warning.cumulative_interest,
                        warning.discrepancy
                    );
                    diagnostics.push(warning);
                }
                bucket
            })
            .collect();

        (TimeSeries::new(rates, buckets), diagnostics)
    }

    /// Compare the band stack against the top cumulative curve
    pub fn check(&self, bucket: &Bucket) -> Option<ConsistencyWarning> {
        let banded_sum = bucket
            .rates
            .iter()
            .fold(0.0, |acc, m| acc + m.banded_interest);
        let cumulative_interest = bucket.top_cumulative_interest();
        let discrepancy = banded_sum - cumulative_interest;

        // Relative to the curve, with an absolute floor near zero.
        // NaN never compares within tolerance, so it is reported too.
        if discrepancy.abs() <= self.tolerance * cumulative_interest.abs().max(1.0) {
            return None;
        }

        Some(ConsistencyWarning {
            bucket_index: bucket.index,
            date: bucket.date,
            banded_sum,
            cumulative_interest,
            discrepancy,
        })
    }
}

fn with_bands(mut bucket: Bucket) -> Bucket {
    let mut lower = 0.0;
    for m in bucket.rates.iter_mut() {
        m.banded_interest = m.cumulative_interest - lower;
        lower = m.cumulative_interest;
    }
    bucket
}
