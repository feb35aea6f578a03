//! Scalar inputs to a projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::projection::calendar;

/// One set of projection inputs, already parsed
///
/// Values are taken as given: nothing here is range-checked, and NaN or
/// infinite values flow into the projected series unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Original principal (property valuation); base of the debt quantiles
    pub principal: f64,

    /// Outstanding debt at the start of the projection
    pub debt: f64,

    /// Borrower's age today
    pub current_age: f64,

    /// Age the retirement marker is placed at
    pub retirement_age: f64,

    /// Fixed amount paid down every month (zero or negative means no payoff)
    pub monthly_payment: f64,

    /// Date the projection is anchored to; truncated to the month start
    pub as_of: NaiveDate,
}

impl ProjectionInputs {
    pub fn new(
        principal: f64,
        debt: f64,
        current_age: f64,
        retirement_age: f64,
        monthly_payment: f64,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            principal,
            debt,
            current_age,
            retirement_age,
            monthly_payment,
            as_of,
        }
    }

    /// Paydown amortizing 2% of the debt per year, rounded down to whole units
    pub fn standard_monthly_payment(debt: f64) -> f64 {
        (debt * 0.02 / 12.0).floor()
    }

    /// First day of the anchor month; date of bucket 0
    pub fn start_month(&self) -> NaiveDate {
        calendar::month_start(self.as_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_monthly_payment() {
        assert_eq!(ProjectionInputs::standard_monthly_payment(2_700_000.0), 4_500.0);
        assert_eq!(ProjectionInputs::standard_monthly_payment(1_000_000.0), 1_666.0);
    }

    #[test]
    fn test_start_month_truncates() {
        let inputs = ProjectionInputs::new(
            1.0,
            1.0,
            30.0,
            65.0,
            1.0,
            NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        );
        assert_eq!(inputs.start_month(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
