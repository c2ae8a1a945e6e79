use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The figures shown in the dashboard's headline cards.
///
/// This struct is the output of the `AnalyticsEngine` and is recomputed on every request;
/// it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiDerivedMetrics {
    // I. Returns
    pub roi_since_inception_pct: Decimal,
    pub roi_last_30_days_pct: Decimal,

    // II. Risk
    pub max_drawdown_pct: Decimal, // Always <= 0

    // III. Allocation
    pub invested_pct: Decimal,
    pub cash_pct: Decimal,

    // IV. Freshness
    /// Date of the latest model-series point.
    pub last_updated_at: Option<NaiveDate>,
    /// Date of the allocation snapshot.
    pub as_of_date: Option<NaiveDate>,
}

impl RoiDerivedMetrics {
    /// Creates a zeroed-out report, used when there is nothing to compute from.
    pub fn new() -> Self {
        Self {
            roi_since_inception_pct: Decimal::ZERO,
            roi_last_30_days_pct: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            invested_pct: Decimal::ZERO,
            cash_pct: Decimal::ZERO,
            last_updated_at: None,
            as_of_date: None,
        }
    }
}

impl Default for RoiDerivedMetrics {
    fn default() -> Self {
        Self::new()
    }
}
