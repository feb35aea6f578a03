//! Monthly bucket series produced by a projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Interest figures for one rate scenario within one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateMetrics {
    /// Annual rate of this scenario
    pub rate: f64,

    /// Interest accrued this month on the remaining debt
    pub interest: f64,

    /// Running sum of `interest`
    pub cumulative_interest: f64,

    /// Running sum of the first month's interest: interest if the debt were never paid down
    pub cumulative_interest_no_paydown: f64,

    /// This scenario's slice of the stacked cumulative interest; zero until derived
    pub banded_interest: f64,
}

impl RateMetrics {
    /// Metrics for the seed month, where all running totals equal the first interest
    pub fn seed(rate: f64, debt: f64) -> Self {
        let interest = monthly_interest(debt, rate);
        Self {
            rate,
            interest,
            cumulative_interest: interest,
            cumulative_interest_no_paydown: interest,
            banded_interest: 0.0,
        }
    }

    /// Metrics for a later month given the previous month and the seed month
    pub fn step(previous: &RateMetrics, seed: &RateMetrics, debt: f64) -> Self {
        let interest = monthly_interest(debt, previous.rate);
        Self {
            rate: previous.rate,
            interest,
            cumulative_interest: previous.cumulative_interest + interest,
            cumulative_interest_no_paydown: previous.cumulative_interest_no_paydown
                + seed.interest,
            banded_interest: 0.0,
        }
    }
}

/// One month of interest on `debt` at annual `rate`
pub fn monthly_interest(debt: f64, rate: f64) -> f64 {
    debt * rate / 12.0
}

/// A single month of projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Position in the series (0 = seed month)
    pub index: usize,

    /// First day of the month
    pub date: NaiveDate,

    /// Remaining debt; may go negative
    pub debt: f64,

    /// Monthly paydown, constant across the series
    pub down_payment: f64,

    /// Running sum of `down_payment`
    pub cumulative_down_payment: f64,

    /// One record per rate scenario, ascending by rate
    pub rates: Vec<RateMetrics>,
}

impl Bucket {
    /// Metrics for the scenario at position `k`
    pub fn rate(&self, k: usize) -> Option<&RateMetrics> {
        self.rates.get(k)
    }

    /// Cumulative interest of the highest-rate scenario
    pub fn top_cumulative_interest(&self) -> f64 {
        self.rates
            .last()
            .map(|m| m.cumulative_interest)
            .unwrap_or(0.0)
    }

    /// Every numeric field of the bucket, as a chart would see them
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        [self.debt, self.down_payment, self.cumulative_down_payment]
            .into_iter()
            .chain(self.rates.iter().flat_map(|m| {
                [
                    m.interest,
                    m.cumulative_interest,
                    m.cumulative_interest_no_paydown,
                    m.banded_interest,
                ]
            }))
    }
}

/// Ordered, fixed-length sequence of monthly buckets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Annual rates the per-bucket metrics are indexed by
    pub rates: Vec<f64>,

    pub buckets: Vec<Bucket>,
}

impl TimeSeries {
    pub fn new(rates: Vec<f64>, buckets: Vec<Bucket>) -> Self {
        Self { rates, buckets }
    }

    /// Series with no buckets, as produced for degenerate inputs
    pub fn empty(rates: Vec<f64>) -> Self {
        Self {
            rates,
            buckets: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    pub fn first(&self) -> Option<&Bucket> {
        self.buckets.first()
    }

    pub fn last(&self) -> Option<&Bucket> {
        self.buckets.last()
    }

    /// Index of the first bucket whose debt is at or below `threshold`
    pub fn first_debt_at_or_below(&self, threshold: f64) -> Option<usize> {
        self.buckets.iter().position(|b| b.debt <= threshold)
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}
