use chrono::{Datelike, Months, NaiveDate};
use std::iter;

/// Dates on which a monthly contribution is made.
///
/// Contributions fall on the 1st of each month, starting with the anchor's month when the
/// anchor is itself a 1st and with the following month otherwise, up to and including `end`.
pub fn contribution_dates(anchor: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let Some(month_start) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1) else {
        return Vec::new();
    };
    let first = if anchor.day() == 1 {
        Some(month_start)
    } else {
        month_start.checked_add_months(Months::new(1))
    };

    iter::successors(first, |date| date.checked_add_months(Months::new(1)))
        .take_while(|date| *date <= end)
        .collect()
}
