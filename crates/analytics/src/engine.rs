use crate::allocation::calculate_allocation_split;
use crate::report::RoiDerivedMetrics;
use crate::roi::{calculate_max_drawdown, calculate_roi_last_n_days, calculate_roi_since_inception};
use configuration::MetricsSettings;
use core_types::{AllocationSnapshot, PerformancePoint};

/// A stateless calculator for the dashboard's derived metrics.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: MetricsSettings,
}

impl AnalyticsEngine {
    pub fn new(settings: MetricsSettings) -> Self {
        Self { settings }
    }

    /// The main entry point for calculating dashboard metrics.
    ///
    /// # Arguments
    ///
    /// * `model_series` - The model portfolio's NAV series, in any order.
    /// * `allocation` - The latest allocation snapshot, if one exists.
    pub fn calculate(
        &self,
        model_series: &[PerformancePoint],
        allocation: Option<&AllocationSnapshot>,
    ) -> RoiDerivedMetrics {
        let split = calculate_allocation_split(allocation);

        let metrics = RoiDerivedMetrics {
            roi_since_inception_pct: calculate_roi_since_inception(model_series),
            roi_last_30_days_pct: calculate_roi_last_n_days(
                model_series,
                self.settings.trailing_window_days,
            ),
            max_drawdown_pct: calculate_max_drawdown(model_series),
            invested_pct: split.invested_pct,
            cash_pct: split.cash_pct,
            last_updated_at: model_series.iter().map(|point| point.date).max(),
            as_of_date: allocation.map(|snapshot| snapshot.as_of_date),
        };

        tracing::debug!(
            points = model_series.len(),
            roi = %metrics.roi_since_inception_pct,
            drawdown = %metrics.max_drawdown_pct,
            "Derived metrics calculated."
        );

        metrics
    }
}
