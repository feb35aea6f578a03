//! Fixed annual interest-rate scenarios evaluated side by side

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ordered set of annual rates
///
/// Always non-empty, finite and strictly ascending. The order drives both the
/// stacking order of banded interest and which rate is "last" for the
/// consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct RateScenarios(Vec<f64>);

impl RateScenarios {
    /// Validate and wrap a list of annual rates
    pub fn new(rates: Vec<f64>) -> Result<Self> {
        if rates.is_empty() {
            return Err(Error::InvalidRates("at least one rate is required".into()));
        }
        if let Some(bad) = rates.iter().find(|r| !r.is_finite()) {
            return Err(Error::InvalidRates(format!("rate {} is not finite", bad)));
        }
        if let Some(pair) = rates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(Error::InvalidRates(format!(
                "rates must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self(rates))
    }

    /// 1% to 7% in 1% steps
    pub fn standard() -> Self {
        Self(vec![0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Highest rate; its cumulative interest is the top of the band stack
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Column label used in exports, e.g. `3%` or `2.5%`
    pub fn label(rate: f64) -> String {
        let pct = rate * 100.0;
        if (pct - pct.round()).abs() < 1e-9 {
            format!("{:.0}%", pct)
        } else {
            format!("{}%", (pct * 1e6).round() / 1e6)
        }
    }
}

impl Default for RateScenarios {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<f64>> for RateScenarios {
    type Error = Error;

    fn try_from(rates: Vec<f64>) -> Result<Self> {
        Self::new(rates)
    }
}

impl From<RateScenarios> for Vec<f64> {
    fn from(rates: RateScenarios) -> Self {
        rates.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rates() {
        let rates = RateScenarios::standard();
        assert_eq!(rates.len(), 7);
        assert_eq!(rates.as_slice()[0], 0.01);
        assert_eq!(rates.last(), 0.07);
    }

    #[test]
    fn test_rejects_unordered_rates() {
        assert!(RateScenarios::new(vec![0.03, 0.02]).is_err());
        assert!(RateScenarios::new(vec![0.03, 0.03]).is_err());
        assert!(RateScenarios::new(vec![]).is_err());
        assert!(RateScenarios::new(vec![0.01, f64::NAN]).is_err());
        assert!(RateScenarios::new(vec![0.015, 0.05]).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: RateScenarios = serde_json::from_str("[0.02, 0.04]").unwrap();
        assert_eq!(ok.as_slice(), &[0.02, 0.04]);

        let bad: std::result::Result<RateScenarios, _> = serde_json::from_str("[0.04, 0.02]");
        assert!(bad.is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(RateScenarios::label(0.03), "3%");
        assert_eq!(RateScenarios::label(0.025), "2.5%");
    }
}
