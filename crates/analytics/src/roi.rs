use crate::math::pct_change;
use crate::series::{nearest_on_or_before_sorted, normalize_series};
use chrono::Duration;
use core_types::PerformancePoint;
use rust_decimal::Decimal;

/// ROI between the first and last point of the series, in percent.
///
/// Fewer than two points, or a non-positive first value, yields `0`.
pub fn calculate_roi_since_inception(points: &[PerformancePoint]) -> Decimal {
    if points.len() < 2 {
        return Decimal::ZERO;
    }
    let sorted = normalize_series(points);
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => pct_change(first.value, last.value),
        _ => Decimal::ZERO,
    }
}

/// ROI over the trailing `days` calendar days ending at the latest point, in percent.
///
/// The window start is anchored on the nearest point on or before `last_date - days`,
/// falling back to the first point when the series does not reach back that far.
pub fn calculate_roi_last_n_days(points: &[PerformancePoint], days: i64) -> Decimal {
    let sorted = normalize_series(points);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Decimal::ZERO;
    };

    let anchor = Duration::try_days(days)
        .and_then(|window| last.date.checked_sub_signed(window))
        .and_then(|target| nearest_on_or_before_sorted(&sorted, target))
        .unwrap_or(first);

    pct_change(anchor.value, last.value)
}

/// Deepest decline from a running peak, in percent.
///
/// The result is always `<= 0`. A series that never drops below its running peak,
/// including one with fewer than two points, returns exactly `0`.
pub fn calculate_max_drawdown(points: &[PerformancePoint]) -> Decimal {
    let sorted = normalize_series(points);
    let Some(first) = sorted.first() else {
        return Decimal::ZERO;
    };

    let mut peak = first.value;
    let mut max_drawdown = Decimal::ZERO;

    for point in &sorted {
        if point.value > peak {
            peak = point.value;
        } else if point.value < peak {
            let drawdown = pct_change(peak, point.value);
            if drawdown < max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    max_drawdown
}
