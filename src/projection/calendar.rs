//! Month-granularity date stepping

use chrono::{Datelike, Months, NaiveDate};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift a date by a signed number of months; `None` outside chrono's range
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Whole months covered by `years`, truncated toward zero
///
/// Non-finite spans give `None`.
pub fn whole_year_months(years: f64) -> Option<i64> {
    if !years.is_finite() {
        return None;
    }
    let months = years.trunc() * 12.0;
    if months.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    Some(months as i64)
}

/// Month start `years` whole years after `date`
pub fn years_after(date: NaiveDate, years: f64) -> Option<NaiveDate> {
    add_months(month_start(date), whole_year_months(years)?)
}
