//! Error type for loading and exporting
//!
//! The projection itself never fails; only the code around it (reading
//! assumptions and inputs, writing results) can.

use std::path::PathBuf;

/// Errors raised outside the projection path
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rate scenarios: {0}")]
    InvalidRates(String),

    #[error("invalid debt quantile: {0}")]
    InvalidQuantile(f64),

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
