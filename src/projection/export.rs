//! CSV and JSON writers for projection output

use std::io::Write;

use super::markers::ReferenceMarker;
use super::result::{ProjectionResult, ProjectionSummary};
use super::series::TimeSeries;
use crate::assumptions::RateScenarios;
use crate::error::Result;

/// Per-rate column groups, in bucket order
const RATE_COLUMNS: [&str; 4] = [
    "interest",
    "cumulative_interest",
    "cumulative_interest_no_paydown",
    "banded_interest",
];

/// Write one row per bucket
///
/// Columns: `index,date,debt,down_payment,cumulative_down_payment`, then
/// for every rate `interest_3%,cumulative_interest_3%,...`.
pub fn write_series_csv<W: Write>(series: &TimeSeries, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = ["index", "date", "debt", "down_payment", "cumulative_down_payment"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for &rate in &series.rates {
        let label = RateScenarios::label(rate);
        header.extend(RATE_COLUMNS.iter().map(|c| format!("{}_{}", c, label)));
    }
    csv.write_record(&header)?;

    for bucket in series {
        let mut record = vec![
            bucket.index.to_string(),
            bucket.date.to_string(),
            format!("{:.8}", bucket.debt),
            format!("{:.8}", bucket.down_payment),
            format!("{:.8}", bucket.cumulative_down_payment),
        ];
        for m in &bucket.rates {
            record.push(format!("{:.8}", m.interest));
            record.push(format!("{:.8}", m.cumulative_interest));
            record.push(format!("{:.8}", m.cumulative_interest_no_paydown));
            record.push(format!("{:.8}", m.banded_interest));
        }
        csv.write_record(&record)?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `kind,label,date,bucket_index` per marker
pub fn write_markers_csv<W: Write>(markers: &[ReferenceMarker], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["kind", "label", "date", "bucket_index"])?;

    for marker in markers {
        csv.write_record([
            marker.kind().to_string(),
            marker.label(),
            marker.date().to_string(),
            marker.bucket_index().map(|i| i.to_string()).unwrap_or_default(),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write one summary row per labelled projection
///
/// All summaries are expected to share the same rate set as the first one.
pub fn write_summaries_csv<W: Write>(rows: &[(String, ProjectionSummary)], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = [
        "id",
        "months",
        "start_date",
        "final_date",
        "final_debt",
        "total_down_payment",
        "chart_ceiling",
        "markers",
        "warnings",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    if let Some((_, first)) = rows.first() {
        for r in &first.rates {
            let label = RateScenarios::label(r.rate);
            header.push(format!("total_interest_{}", label));
            header.push(format!("interest_avoided_{}", label));
        }
    }
    csv.write_record(&header)?;

    for (id, summary) in rows {
        let mut record = vec![
            id.clone(),
            summary.total_months.to_string(),
            summary.start_date.map(|d| d.to_string()).unwrap_or_default(),
            summary.final_date.map(|d| d.to_string()).unwrap_or_default(),
            format!("{:.2}", summary.final_debt),
            format!("{:.2}", summary.total_down_payment),
            format!("{:.0}", summary.chart_ceiling),
            summary.marker_count.to_string(),
            summary.warning_count.to_string(),
        ];
        for r in &summary.rates {
            record.push(format!("{:.2}", r.total_interest));
            record.push(format!("{:.2}", r.interest_avoided));
        }
        csv.write_record(&record)?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Pretty-printed JSON of the whole result
pub fn write_json<W: Write>(result: &ProjectionResult, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}
