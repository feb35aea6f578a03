//! Load batches of projection inputs from CSV
//!
//! Columns: `id,principal,debt,age,retirement_age[,monthly_payment][,as_of]`.
//! A blank or missing `monthly_payment` falls back to the standard 2% paydown,
//! a blank or missing `as_of` to the date passed by the caller.

use chrono::NaiveDate;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ProjectionInputs;
use crate::error::{Error, Result};

/// Inputs tagged with the identifier they were loaded under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSet {
    pub id: String,
    pub inputs: ProjectionInputs,
}

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    principal: f64,
    debt: f64,
    age: f64,
    retirement_age: f64,
    #[serde(default)]
    monthly_payment: Option<f64>,
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

impl CsvRow {
    fn into_input_set(self, row: usize, default_as_of: NaiveDate) -> Result<InputSet> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidRow {
                row,
                message: "empty id".into(),
            });
        }

        let monthly_payment = self
            .monthly_payment
            .unwrap_or_else(|| ProjectionInputs::standard_monthly_payment(self.debt));

        Ok(InputSet {
            id: self.id,
            inputs: ProjectionInputs::new(
                self.principal,
                self.debt,
                self.age,
                self.retirement_age,
                monthly_payment,
                self.as_of.unwrap_or(default_as_of),
            ),
        })
    }
}

/// Load all input sets from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P, default_as_of: NaiveDate) -> Result<Vec<InputSet>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    load_inputs_from_reader(file, default_as_of)
}

/// Load input sets from any reader (e.g., string buffer, stdin)
pub fn load_inputs_from_reader<R: std::io::Read>(
    reader: R,
    default_as_of: NaiveDate,
) -> Result<Vec<InputSet>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut sets = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result.map_err(|e| Error::InvalidRow {
            row: idx + 1,
            message: e.to_string(),
        })?;
        sets.push(row.into_input_set(idx + 1, default_as_of)?);
    }

    Ok(sets)
}
