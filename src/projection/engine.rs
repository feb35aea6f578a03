//! Core projection engine for monthly debt and interest series

use chrono::NaiveDate;

use super::calendar;
use super::derived::DerivedMetricsCalculator;
use super::markers::ReferenceMarkerCalculator;
use super::result::ProjectionResult;
use super::series::{Bucket, RateMetrics, TimeSeries};
use crate::assumptions::Assumptions;
use crate::inputs::ProjectionInputs;

/// How the number of buckets was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    /// Months until the linear paydown reaches zero
    Payoff(usize),
    /// Whole months from now until the death age, used without a positive paydown
    Lifetime(usize),
    /// Inputs give no usable length; the series is empty
    Degenerate,
}

impl Horizon {
    /// Number of buckets to generate
    pub fn months(self) -> usize {
        match self {
            Horizon::Payoff(n) | Horizon::Lifetime(n) => n,
            Horizon::Degenerate => 0,
        }
    }

    /// Decide the horizon for a debt and monthly payment
    ///
    /// Never fails: anything that does not yield a finite, positive month
    /// count is `Degenerate`, as is a count above `max_months` when a cap is set.
    pub fn resolve(
        debt: f64,
        monthly_payment: f64,
        current_age: f64,
        death_age: f64,
        max_months: Option<usize>,
    ) -> Self {
        if !monthly_payment.is_finite() {
            return Horizon::Degenerate;
        }

        let (months, payoff) = if monthly_payment > 0.0 {
            ((debt / monthly_payment).ceil(), true)
        } else {
            match calendar::whole_year_months(death_age - current_age) {
                Some(m) => (m as f64, false),
                None => return Horizon::Degenerate,
            }
        };

        // NaN fails this comparison too
        if !(months >= 1.0) {
            return Horizon::Degenerate;
        }
        if let Some(cap) = max_months.filter(|&cap| months > cap as f64) {
            log::warn!(
                "horizon of {} months exceeds the {} month cap; treating as degenerate",
                months,
                cap
            );
            return Horizon::Degenerate;
        }

        let months = months as usize;
        if payoff {
            Horizon::Payoff(months)
        } else {
            Horizon::Lifetime(months)
        }
    }
}

/// Main projection engine
///
/// Holds only assumptions; every call starts from a fresh series, so results
/// depend on the arguments alone.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run all three stages: base series, banded interest, reference markers
    pub fn project(&self, inputs: &ProjectionInputs) -> ProjectionResult {
        let series = self.build_series(inputs);

        let (series, diagnostics) =
            DerivedMetricsCalculator::new(self.assumptions.consistency_tolerance).apply(series);

        let markers = ReferenceMarkerCalculator::new(
            &self.assumptions.debt_quantiles,
            self.assumptions.lifetime.life_expectancy_age,
        )
        .calculate(&series, inputs);

        log::debug!(
            "projection: {} buckets, {} markers, {} consistency warnings",
            series.len(),
            markers.len(),
            diagnostics.len()
        );

        ProjectionResult {
            inputs: inputs.clone(),
            series,
            markers,
            diagnostics,
        }
    }

    /// Horizon for the given inputs under these assumptions
    ///
    /// A horizon whose last month falls outside the calendar is `Degenerate`,
    /// so every month of a non-empty series has a date.
    pub fn horizon(&self, inputs: &ProjectionInputs) -> Horizon {
        let horizon = Horizon::resolve(
            inputs.debt,
            inputs.monthly_payment,
            inputs.current_age,
            self.assumptions.lifetime.death_age,
            self.assumptions.max_horizon_months,
        );

        let n = horizon.months();
        if n == 0 {
            return horizon;
        }
        let start = inputs.start_month();
        let end = i64::try_from(n - 1)
            .ok()
            .and_then(|last| calendar::add_months(start, last));
        if end.is_none() {
            log::warn!(
                "{} months from {} runs past the calendar; treating as degenerate",
                n,
                start
            );
            return Horizon::Degenerate;
        }
        horizon
    }

    /// Build the base series (banded interest left at zero)
    pub fn build_series(&self, inputs: &ProjectionInputs) -> TimeSeries {
        let rates: Vec<f64> = self.assumptions.rates.iter().collect();
        let horizon = self.horizon(inputs);
        let n = horizon.months();
        log::debug!("horizon {:?} for debt {} / payment {}", horizon, inputs.debt, inputs.monthly_payment);

        if n == 0 {
            return TimeSeries::empty(rates);
        }

        let start = inputs.start_month();
        let mut buckets: Vec<Bucket> = Vec::with_capacity(n);
        buckets.push(seed_bucket(start, inputs, &rates));

        for i in 1..n {
            // Last month was checked by `horizon`; the series is never cut short
            let Some(date) = calendar::add_months(start, i as i64) else {
                return TimeSeries::empty(rates);
            };
            let bucket = step_bucket(i, date, &buckets[i - 1], &buckets[0], inputs.monthly_payment);
            buckets.push(bucket);
        }

        TimeSeries::new(rates, buckets)
    }
}

/// Bucket 0: the starting debt with every running total equal to its first month
fn seed_bucket(date: NaiveDate, inputs: &ProjectionInputs, rates: &[f64]) -> Bucket {
    Bucket {
        index: 0,
        date,
        debt: inputs.debt,
        down_payment: inputs.monthly_payment,
        cumulative_down_payment: inputs.monthly_payment,
        rates: rates
            .iter()
            .map(|&rate| RateMetrics::seed(rate, inputs.debt))
            .collect(),
    }
}

/// Bucket `index` from its predecessor and the seed
fn step_bucket(
    index: usize,
    date: NaiveDate,
    previous: &Bucket,
    seed: &Bucket,
    monthly_payment: f64,
) -> Bucket {
    let debt = previous.debt - monthly_payment;
    Bucket {
        index,
        date,
        debt,
        down_payment: monthly_payment,
        cumulative_down_payment: previous.cumulative_down_payment + monthly_payment,
        rates: previous
            .rates
            .iter()
            .zip(&seed.rates)
            .map(|(prev, first)| RateMetrics::step(prev, first, debt))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::RateScenarios;
    use approx::assert_relative_eq;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn inputs(debt: f64, monthly_payment: f64) -> ProjectionInputs {
        ProjectionInputs::new(3_600_000.0, debt, 34.0, 65.0, monthly_payment, as_of())
    }

    #[test]
    fn test_payoff_horizon() {
        let engine = ProjectionEngine::default();
        let series = engine.build_series(&inputs(2_700_000.0, 4_500.0));
        assert_eq!(engine.horizon(&inputs(2_700_000.0, 4_500.0)), Horizon::Payoff(600));
        assert_eq!(series.len(), 600);
    }

    #[test]
    fn test_payoff_horizon_rounds_up() {
        assert_eq!(Horizon::resolve(1_000.0, 300.0, 34.0, 100.0, None), Horizon::Payoff(4));
    }

    #[test]
    fn test_small_payment_runs_past_a_thousand_years() {
        let engine = ProjectionEngine::default();
        let i = inputs(2_700_000.0, 200.0);
        assert_eq!(engine.horizon(&i), Horizon::Payoff(13_500));

        let result = engine.project(&i);
        assert_eq!(result.series.len(), 13_500);
        let last = result.series.last().unwrap();
        assert_eq!(last.index, 13_499);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(3149, 2, 1).unwrap());
        assert!(!result.markers.is_empty());
    }

    #[test]
    fn test_horizon_past_calendar_end_is_degenerate() {
        let engine = ProjectionEngine::default();
        let mut i = inputs(100.0, 1.0);
        i.as_of = NaiveDate::MAX;
        assert_eq!(engine.horizon(&i), Horizon::Degenerate);
        let result = engine.project(&i);
        assert!(result.series.is_empty());
        assert!(result.markers.is_empty());

        // One month fits: the seed sits in the last calendar month
        let mut one = inputs(1.0, 1.0);
        one.as_of = NaiveDate::MAX;
        assert_eq!(engine.build_series(&one).len(), 1);
    }

    #[test]
    fn test_lifetime_horizon_ignores_debt_and_rates() {
        let engine = ProjectionEngine::new(Assumptions::with_rates(
            RateScenarios::new(vec![0.045]).unwrap(),
        ));
        for debt in [1.0, 2_700_000.0, -50.0] {
            let series = engine.build_series(&inputs(debt, 0.0));
            assert_eq!(series.len(), 792);
        }
        assert_eq!(engine.horizon(&inputs(1.0, -10.0)), Horizon::Lifetime(792));
    }

    #[test]
    fn test_degenerate_inputs_give_empty_series() {
        let engine = ProjectionEngine::default();
        for payment in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(engine.build_series(&inputs(2_700_000.0, payment)).is_empty());
        }
        // Nothing left to pay
        assert!(engine.build_series(&inputs(0.0, 4_500.0)).is_empty());
        assert!(engine.build_series(&inputs(-10.0, 4_500.0)).is_empty());
        assert!(engine.build_series(&inputs(f64::NAN, 4_500.0)).is_empty());

        // Already past the death age
        let mut old = inputs(100.0, 0.0);
        old.current_age = 100.0;
        assert!(engine.build_series(&old).is_empty());
    }

    #[test]
    fn test_horizon_cap_is_opt_in() {
        assert_eq!(Horizon::resolve(1e12, 1.0, 34.0, 100.0, Some(12_000)), Horizon::Degenerate);
        assert_eq!(
            Horizon::resolve(12_000.0, 1.0, 34.0, 100.0, Some(12_000)),
            Horizon::Payoff(12_000)
        );
        assert_eq!(Horizon::resolve(12_001.0, 1.0, 34.0, 100.0, None), Horizon::Payoff(12_001));
    }

    #[test]
    fn test_seed_bucket() {
        let engine = ProjectionEngine::default();
        let series = engine.build_series(&inputs(2_700_000.0, 4_500.0));
        let seed = series.first().unwrap();

        assert_eq!(seed.index, 0);
        assert_eq!(seed.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(seed.debt, 2_700_000.0);
        assert_eq!(seed.down_payment, 4_500.0);
        assert_eq!(seed.cumulative_down_payment, 4_500.0);

        let three_pct = seed.rate(2).unwrap();
        assert_eq!(three_pct.rate, 0.03);
        assert_eq!(three_pct.interest, 6_750.0);
        assert_eq!(three_pct.cumulative_interest, 6_750.0);
        assert_eq!(three_pct.cumulative_interest_no_paydown, 6_750.0);
    }

    #[test]
    fn test_final_bucket_of_payoff() {
        let engine = ProjectionEngine::default();
        let series = engine.build_series(&inputs(2_700_000.0, 4_500.0));
        let last = series.last().unwrap();

        assert_eq!(last.index, 599);
        // 599 paydowns applied to the starting debt; 600 counted as paid
        assert_eq!(last.debt, 4_500.0);
        assert_eq!(last.cumulative_down_payment, 2_700_000.0);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2074, 2, 1).unwrap());
    }

    #[test]
    fn test_debt_is_not_clamped() {
        let engine = ProjectionEngine::default();
        let mut i = inputs(1_000.0, -250.0);
        i.current_age = 99.0;
        let series = engine.build_series(&i);
        assert_eq!(series.len(), 12);
        assert_eq!(series.last().unwrap().debt, 1_000.0 + 11.0 * 250.0);

        let series = engine.build_series(&inputs(-50.0, 0.0));
        assert!(series.iter().all(|b| b.debt == -50.0));

        // Payoff horizon stops at the last month with debt still above zero
        let series = engine.build_series(&inputs(1_000.0, 300.0));
        let debts: Vec<f64> = series.iter().map(|b| b.debt).collect();
        assert_eq!(debts, vec![1_000.0, 700.0, 400.0, 100.0]);
    }

    #[test]
    fn test_recurrences_hold() {
        let engine = ProjectionEngine::default();
        let series = engine.build_series(&inputs(2_700_000.0, 4_500.0));
        let seed = series.first().unwrap().clone();

        for pair in series.buckets.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            assert_eq!(cur.debt, prev.debt - 4_500.0);
            assert_eq!(cur.date, calendar::add_months(prev.date, 1).unwrap());
        }

        for bucket in &series {
            let months = (bucket.index + 1) as f64;
            assert_eq!(bucket.cumulative_down_payment, months * 4_500.0);
            for (k, m) in bucket.rates.iter().enumerate() {
                assert_relative_eq!(m.interest, bucket.debt * m.rate / 12.0);
                assert_relative_eq!(
                    m.cumulative_interest_no_paydown,
                    months * seed.rates[k].interest,
                    max_relative = 1e-10
                );
            }
        }

        for k in 0..series.rates.len() {
            let total: f64 = series.iter().map(|b| b.rates[k].interest).sum();
            assert_relative_eq!(
                series.last().unwrap().rates[k].cumulative_interest,
                total,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_identical_inputs_identical_series() {
        let engine = ProjectionEngine::default();
        let a = engine.project(&inputs(2_700_000.0, 4_500.0));
        let b = engine.project(&inputs(2_700_000.0, 4_500.0));
        assert_eq!(a.series, b.series);
        assert_eq!(a.markers, b.markers);
    }

    #[test]
    fn test_nan_inputs_propagate() {
        let engine = ProjectionEngine::default();
        let series = engine.build_series(&inputs(f64::NAN, 0.0));
        assert_eq!(series.len(), 792);
        assert!(series.iter().all(|b| b.debt.is_nan()));
        assert!(series.last().unwrap().rates[0].cumulative_interest.is_nan());
    }
}
