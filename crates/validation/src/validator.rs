use crate::summary::ValidationSummary;
use analytics::normalize_series;
use chrono::{NaiveDate, Utc};
use configuration::ValidationRules;
use core_types::{AllocationSnapshot, DashboardSettings, PerformancePoint, SeriesKind};
use rust_decimal::Decimal;

/// Everything the dashboard is about to publish, borrowed from the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationInput<'a> {
    pub settings: Option<&'a DashboardSettings>,
    pub model_series: &'a [PerformancePoint],
    pub btc_series: &'a [PerformancePoint],
    pub eth_series: &'a [PerformancePoint],
    pub allocation: Option<&'a AllocationSnapshot>,
}

/// Runs every validation check against a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Runs all checks. `today` is the reference date for staleness.
    pub fn validate(&self, input: &ValidationInput<'_>, today: NaiveDate) -> ValidationSummary {
        let mut summary = ValidationSummary::new();

        summary.merge(self.validate_settings(input.settings));
        for (kind, points) in [
            (SeriesKind::Model, input.model_series),
            (SeriesKind::Btc, input.btc_series),
            (SeriesKind::Eth, input.eth_series),
        ] {
            summary.merge(self.validate_series(points, kind.label(), kind.is_benchmark(), today));
        }
        summary.merge(self.validate_allocation(input.allocation));

        tracing::debug!(
            errors = summary.errors.len(),
            warnings = summary.warnings.len(),
            "Validation summary built."
        );

        summary
    }

    pub fn validate_settings(&self, settings: Option<&DashboardSettings>) -> ValidationSummary {
        let mut summary = ValidationSummary::new();
        if settings.is_none() {
            summary.error("Dashboard settings are missing.");
        }
        summary
    }

    /// Checks one series.
    ///
    /// An empty series is an error unless `allow_empty`, in which case it is a warning and
    /// no further checks apply. Each remaining check reports at most one finding.
    pub fn validate_series(
        &self,
        points: &[PerformancePoint],
        label: &str,
        allow_empty: bool,
        today: NaiveDate,
    ) -> ValidationSummary {
        let mut summary = ValidationSummary::new();

        if points.is_empty() {
            let message = format!("{label} series is empty.");
            if allow_empty {
                summary.warning(message);
            } else {
                summary.error(message);
            }
            return summary;
        }

        let sorted = normalize_series(points);

        if let Some(point) = sorted.iter().find(|point| point.value <= Decimal::ZERO) {
            summary.error(format!(
                "{label} series has a non-positive value ({}) on {}.",
                point.value, point.date
            ));
        }

        if let Some(pair) = sorted.windows(2).find(|pair| pair[1].date <= pair[0].date) {
            summary.warning(format!(
                "{label} series dates are not strictly increasing at {}.",
                pair[1].date
            ));
        }

        if let Some(last) = sorted.last() {
            let age_days = (today - last.date).num_days();
            if age_days > self.rules.stale_after_days {
                summary.warning(format!(
                    "{label} series was last updated {age_days} days ago ({}).",
                    last.date
                ));
            }
        }

        summary
    }

    /// Checks the allocation snapshot's weights. A missing snapshot is only a warning.
    pub fn validate_allocation(&self, allocation: Option<&AllocationSnapshot>) -> ValidationSummary {
        let mut summary = ValidationSummary::new();

        let Some(allocation) = allocation else {
            summary.warning("Allocation snapshot is missing.");
            return summary;
        };

        if !is_fraction(allocation.cash_weight) {
            summary.error(format!(
                "Allocation cash weight {} is outside [0, 1].",
                allocation.cash_weight
            ));
        }

        if let Some(item) = allocation.items.iter().find(|item| !is_fraction(item.weight)) {
            summary.error(format!(
                "Allocation weight for {} ({}) is outside [0, 1].",
                item.asset, item.weight
            ));
        }

        let tolerance = self.rules.weight_tolerance;
        match allocation.total_weight() {
            Some(total) => {
                let within = total
                    .checked_sub(Decimal::ONE)
                    .is_some_and(|diff| diff.abs() <= tolerance);
                if !within {
                    summary.error(format!(
                        "Allocation weights sum to {total}; expected 1 within {tolerance}."
                    ));
                }
            }
            None => summary.error(format!(
                "Allocation weights overflow when summed; expected 1 within {tolerance}."
            )),
        }

        summary
    }
}

fn is_fraction(weight: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE).contains(&weight)
}

/// Validates `input` with the default thresholds (7-day staleness, 0.5% weight tolerance).
pub fn build_validation_summary(input: &ValidationInput<'_>, today: NaiveDate) -> ValidationSummary {
    Validator::default().validate(input, today)
}

/// [`build_validation_summary`] evaluated against the current UTC date.
pub fn build_validation_summary_now(input: &ValidationInput<'_>) -> ValidationSummary {
    build_validation_summary(input, Utc::now().date_naive())
}
