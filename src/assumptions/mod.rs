//! Projection assumptions: rate scenarios, lifetime ages, marker thresholds

mod rates;
pub mod loader;

pub use rates::RateScenarios;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Ages that bound the projection and place the life-event markers
///
/// `death_age` only sizes the horizon when there is no paydown; the
/// life-expectancy marker uses its own, smaller age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeAssumptions {
    /// Age the no-paydown horizon runs to
    pub death_age: f64,

    /// Age of the life-expectancy marker
    pub life_expectancy_age: f64,
}

impl Default for LifetimeAssumptions {
    fn default() -> Self {
        Self {
            death_age: 100.0,
            life_expectancy_age: 82.0,
        }
    }
}

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub rates: RateScenarios,
    pub lifetime: LifetimeAssumptions,

    /// Fractions of the principal that get a debt-crossing marker
    pub debt_quantiles: Vec<f64>,

    /// Largest tolerated gap between the band stack and the top cumulative
    /// curve, relative to the curve (absolute below 1.0)
    pub consistency_tolerance: f64,

    /// Optional cap; horizons longer than this are treated as degenerate.
    /// Unset, the horizon is whatever the paydown needs.
    pub max_horizon_months: Option<usize>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            rates: RateScenarios::standard(),
            lifetime: LifetimeAssumptions::default(),
            debt_quantiles: vec![0.9, 0.75, 0.5, 0.25],
            consistency_tolerance: 1e-9,
            max_horizon_months: None,
        }
    }
}

impl Assumptions {
    /// Standard assumptions with a different rate set
    pub fn with_rates(rates: RateScenarios) -> Self {
        Self {
            rates,
            ..Self::default()
        }
    }

    /// Load assumptions from a JSON document; missing fields take defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let assumptions: Self = serde_json::from_reader(reader)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Check the fields serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(&q) = self.debt_quantiles.iter().find(|q| !q.is_finite()) {
            return Err(Error::InvalidQuantile(q));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let a = Assumptions::default();
        assert_eq!(a.rates, RateScenarios::standard());
        assert_eq!(a.lifetime.death_age, 100.0);
        assert_eq!(a.lifetime.life_expectancy_age, 82.0);
        assert_eq!(a.debt_quantiles, vec![0.9, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "rates": [0.02, 0.05], "lifetime": { "death_age": 95 } }"#;
        let a = Assumptions::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(a.rates.as_slice(), &[0.02, 0.05]);
        assert_eq!(a.lifetime.death_age, 95.0);
        assert_eq!(a.lifetime.life_expectancy_age, 82.0);
        assert_eq!(a.max_horizon_months, None);
    }

    #[test]
    fn test_json_horizon_cap() {
        let json = r#"{ "max_horizon_months": 12000 }"#;
        let a = Assumptions::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(a.max_horizon_months, Some(12_000));
    }

    #[test]
    fn test_json_rejects_bad_rates() {
        let json = r#"{ "rates": [0.05, 0.02] }"#;
        assert!(Assumptions::from_json_reader(json.as_bytes()).is_err());
    }
}
