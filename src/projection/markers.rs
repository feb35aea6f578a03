//! Reference markers: debt-quantile crossings and life events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::series::TimeSeries;
use crate::inputs::ProjectionInputs;

/// Fixed points in the borrower's life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEvent {
    Retirement,
    LifeExpectancy,
}

impl LifeEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeEvent::Retirement => "Retirement",
            LifeEvent::LifeExpectancy => "Life expectancy",
        }
    }
}

/// A labelled point in time for a vertical chart annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceMarker {
    /// First month the debt is at or below `fraction` of the principal
    DebtQuantile {
        fraction: f64,
        bucket_index: usize,
        date: NaiveDate,
    },
    LifeEvent { event: LifeEvent, date: NaiveDate },
}

impl ReferenceMarker {
    pub fn date(&self) -> NaiveDate {
        match self {
            ReferenceMarker::DebtQuantile { date, .. } | ReferenceMarker::LifeEvent { date, .. } => {
                *date
            }
        }
    }

    /// `"50.0%"` for quantiles, the event name otherwise
    pub fn label(&self) -> String {
        match self {
            ReferenceMarker::DebtQuantile { fraction, .. } => format!("{:.1}%", fraction * 100.0),
            ReferenceMarker::LifeEvent { event, .. } => event.as_str().to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReferenceMarker::DebtQuantile { .. } => "debt_quantile",
            ReferenceMarker::LifeEvent { .. } => "life_event",
        }
    }

    pub fn bucket_index(&self) -> Option<usize> {
        match self {
            ReferenceMarker::DebtQuantile { bucket_index, .. } => Some(*bucket_index),
            ReferenceMarker::LifeEvent { .. } => None,
        }
    }
}

/// Computes markers from a finished series
pub struct ReferenceMarkerCalculator<'a> {
    quantiles: &'a [f64],
    life_expectancy_age: f64,
}

impl<'a> ReferenceMarkerCalculator<'a> {
    pub fn new(quantiles: &'a [f64], life_expectancy_age: f64) -> Self {
        Self {
            quantiles,
            life_expectancy_age,
        }
    }

    /// Quantile markers in configured order, then retirement, then life expectancy
    ///
    /// An empty series has no time axis to annotate and gets no markers.
    pub fn calculate(&self, series: &TimeSeries, inputs: &ProjectionInputs) -> Vec<ReferenceMarker> {
        if series.is_empty() {
            return Vec::new();
        }
        let mut markers = self.debt_quantiles(series, inputs.principal);
        markers.extend(self.life_events(inputs));
        markers
    }

    /// One marker per fraction whose threshold the debt reaches within the series
    ///
    /// A crossing in the very first bucket counts: when the starting debt is
    /// already below the threshold, the marker sits at the seed month.
    pub fn debt_quantiles(&self, series: &TimeSeries, principal: f64) -> Vec<ReferenceMarker> {
        self.quantiles
            .iter()
            .filter_map(|&fraction| {
                let idx = series.first_debt_at_or_below(principal * fraction)?;
                let bucket = series.get(idx)?;
                Some(ReferenceMarker::DebtQuantile {
                    fraction,
                    bucket_index: idx,
                    date: bucket.date,
                })
            })
            .collect()
    }

    /// Retirement and life-expectancy markers; either is skipped if its date cannot be computed
    pub fn life_events(&self, inputs: &ProjectionInputs) -> Vec<ReferenceMarker> {
        [
            (LifeEvent::Retirement, inputs.retirement_age),
            (LifeEvent::LifeExpectancy, self.life_expectancy_age),
        ]
        .into_iter()
        .filter_map(|(event, age)| {
            let date = calendar::years_after(inputs.as_of, age - inputs.current_age)?;
            Some(ReferenceMarker::LifeEvent { event, date })
        })
        .collect()
    }
}
