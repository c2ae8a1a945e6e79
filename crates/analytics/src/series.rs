use chrono::NaiveDate;
use core_types::PerformancePoint;

/// Returns a copy of `points` sorted ascending by date.
///
/// The sort is stable, so points sharing a date keep their input order. No deduplication
/// or validation happens here.
pub fn normalize_series(points: &[PerformancePoint]) -> Vec<PerformancePoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|point| point.date);
    sorted
}

/// Finds the last point dated on or before `target`.
///
/// The input does not need to be sorted. Returns `None` for an empty series or when every
/// point is strictly after `target`. When several points share the winning date, the
/// chronologically last one (post-sort) is returned. Values are never interpolated.
pub fn find_nearest_on_or_before(
    points: &[PerformancePoint],
    target: NaiveDate,
) -> Option<PerformancePoint> {
    let sorted = normalize_series(points);
    nearest_on_or_before_sorted(&sorted, target).copied()
}

/// Same lookup as [`find_nearest_on_or_before`] over an already normalized series.
pub fn nearest_on_or_before_sorted(
    sorted: &[PerformancePoint],
    target: NaiveDate,
) -> Option<&PerformancePoint> {
    sorted.iter().rev().find(|point| point.date <= target)
}
