use crate::models::{SimulationPoint, SimulatorInput, SimulatorResult};
use crate::schedule::contribution_dates;
use analytics::math::{growth_ratio, pct_change};
use analytics::series::{nearest_on_or_before_sorted, normalize_series};
use chrono::NaiveDate;
use core_types::PerformancePoint;
use rust_decimal::Decimal;

/// A monthly contribution and the series level it was invested at.
#[derive(Debug, Clone, Copy)]
struct Contribution {
    date: NaiveDate,
    base_value: Decimal,
}

/// Replays `input` through the historical path of `points`.
///
/// 1. The anchor is the nearest point on or before `input.start_date` (or the first
///    point); the simulation window runs from the anchor's date to the last point.
/// 2. The lump sum scales with `value / anchor_value`.
/// 3. Each monthly contribution is anchored on its own nearest-on-or-before point and
///    scales the same way from there, once its date has been reached.
///
/// An empty series yields an all-zero result.
pub fn run_simulation(points: &[PerformancePoint], input: &SimulatorInput) -> SimulatorResult {
    let sorted = normalize_series(points);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return SimulatorResult::default();
    };

    let starting_capital = input.starting_capital.max(Decimal::ZERO);
    let monthly_contribution = input.monthly_contribution.max(Decimal::ZERO);

    let anchor = *nearest_on_or_before_sorted(&sorted, input.start_date).unwrap_or(first);
    if anchor.value <= Decimal::ZERO {
        tracing::warn!(date = %anchor.date, "Simulation anchor has a non-positive value.");
    }

    let contributions: Vec<Contribution> =
        if input.include_monthly_contributions && monthly_contribution > Decimal::ZERO {
            contribution_dates(anchor.date, last.date)
                .into_iter()
                .map(|date| Contribution {
                    date,
                    base_value: nearest_on_or_before_sorted(&sorted, date)
                        .map(|point| point.value)
                        .unwrap_or(Decimal::ZERO),
                })
                .collect()
        } else {
            Vec::new()
        };

    let window = sorted.iter().filter(|point| point.date >= anchor.date);
    let series: Vec<SimulationPoint> = window
        .map(|point| {
            let lump_sum = scale(starting_capital, anchor.value, point.value);
            let balance = contributions
                .iter()
                .filter(|contribution| contribution.date <= point.date)
                .fold(lump_sum, |balance, contribution| {
                    balance.saturating_add(scale(
                        monthly_contribution,
                        contribution.base_value,
                        point.value,
                    ))
                });
            SimulationPoint {
                date: point.date,
                balance,
            }
        })
        .collect();

    let total_contributed = starting_capital.saturating_add(
        monthly_contribution.saturating_mul(Decimal::from(contributions.len())),
    );
    let final_balance = series
        .last()
        .map(|point| point.balance)
        .unwrap_or(starting_capital);
    let (max_drawdown_pct, max_drawdown_amount) = balance_drawdown(&series);

    tracing::debug!(
        anchor = %anchor.date,
        window = series.len(),
        contributions = contributions.len(),
        final_balance = %final_balance,
        "Simulation complete."
    );

    SimulatorResult {
        series,
        final_balance,
        total_contributed,
        profit: final_balance.saturating_sub(total_contributed),
        roi_pct: pct_change(total_contributed, final_balance),
        max_drawdown_pct,
        max_drawdown_amount,
    }
}

/// `amount` grown from the level `base` to the level `value`.
fn scale(amount: Decimal, base: Decimal, value: Decimal) -> Decimal {
    amount.saturating_mul(growth_ratio(base, value))
}

/// Worst percentage and worst absolute decline of the balance from its running peak.
///
/// The two are tracked independently and may come from different dates; both are `<= 0`.
fn balance_drawdown(series: &[SimulationPoint]) -> (Decimal, Decimal) {
    let Some(first) = series.first() else {
        return (Decimal::ZERO, Decimal::ZERO);
    };

    let mut peak = first.balance;
    let mut worst_pct = Decimal::ZERO;
    let mut worst_amount = Decimal::ZERO;

    for point in series {
        if point.balance > peak {
            peak = point.balance;
            continue;
        }
        worst_pct = worst_pct.min(pct_change(peak, point.balance));
        worst_amount = worst_amount.min(point.balance.saturating_sub(peak));
    }

    (worst_pct, worst_amount)
}
