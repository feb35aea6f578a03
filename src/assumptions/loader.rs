//! CSV-based rate scenario loader
//!
//! Expects a header row with a `rate` column; one annual rate per row.

use std::fs::File;
use std::path::Path;

use super::RateScenarios;
use crate::error::{Error, Result};

/// Load rate scenarios from a CSV file
pub fn load_rates(path: &Path) -> Result<RateScenarios> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    load_rates_from_reader(file)
}

/// Load rate scenarios from any reader
pub fn load_rates_from_reader<R: std::io::Read>(reader: R) -> Result<RateScenarios> {
    let mut reader = csv::Reader::from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("rate"))
        .ok_or_else(|| Error::InvalidRates("missing `rate` column".into()))?;

    let mut rates = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let raw = record.get(column).unwrap_or("").trim();
        let rate: f64 = raw.parse().map_err(|_| Error::InvalidRow {
            row: idx + 1,
            message: format!("cannot parse rate `{}`", raw),
        })?;
        rates.push(rate);
    }

    RateScenarios::new(rates)
}
