use analytics::{AnalyticsEngine, RoiDerivedMetrics, normalize_series};
use chrono::NaiveDate;
use configuration::Config;
use core_types::{AllocationSnapshot, ChangeLogEvent, DashboardSettings, PerformancePoint};
use serde::{Deserialize, Serialize};
use validation::{ValidationInput, ValidationSummary, Validator};

/// Everything the persistence layer hands over for one dashboard request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub settings: Option<DashboardSettings>,
    pub model_series: Vec<PerformancePoint>,
    pub btc_series: Vec<PerformancePoint>,
    pub eth_series: Vec<PerformancePoint>,
    pub allocation: Option<AllocationSnapshot>,
    pub change_log_events: Vec<ChangeLogEvent>,
}

/// The chart series, sorted ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSeries {
    pub model: Vec<PerformancePoint>,
    pub btc: Vec<PerformancePoint>,
    pub eth: Vec<PerformancePoint>,
}

/// The aggregate returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiDashboardPayload {
    pub settings: Option<DashboardSettings>,
    pub series: DashboardSeries,
    pub allocation: Option<AllocationSnapshot>,
    pub change_log_events: Vec<ChangeLogEvent>,
    pub metrics: RoiDerivedMetrics,
    pub validation: ValidationSummary,
}

/// Builds dashboard payloads with a fixed set of metric and validation settings.
#[derive(Debug, Clone, Default)]
pub struct DashboardBuilder {
    analytics: AnalyticsEngine,
    validator: Validator,
}

impl DashboardBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            analytics: AnalyticsEngine::new(config.metrics.clone()),
            validator: Validator::new(config.validation.clone()),
        }
    }

    /// Computes metrics and validation for `data` and packages them with the inputs.
    ///
    /// `today` is the reference date for staleness warnings.
    pub fn build(&self, data: DashboardData, today: NaiveDate) -> RoiDashboardPayload {
        let metrics = self
            .analytics
            .calculate(&data.model_series, data.allocation.as_ref());

        let validation = self.validator.validate(
            &ValidationInput {
                settings: data.settings.as_ref(),
                model_series: &data.model_series,
                btc_series: &data.btc_series,
                eth_series: &data.eth_series,
                allocation: data.allocation.as_ref(),
            },
            today,
        );

        if !validation.is_publishable() {
            tracing::warn!(
                errors = validation.errors.len(),
                "Dashboard payload has validation errors."
            );
        }

        RoiDashboardPayload {
            series: DashboardSeries {
                model: normalize_series(&data.model_series),
                btc: normalize_series(&data.btc_series),
                eth: normalize_series(&data.eth_series),
            },
            settings: data.settings,
            allocation: data.allocation,
            change_log_events: data.change_log_events,
            metrics,
            validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::MetricsSettings;
    use core_types::AllocationItem;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_data() -> DashboardData {
        DashboardData {
            settings: Some(DashboardSettings::default()),
            model_series: vec![
                PerformancePoint::new(day(2024, 6, 8), dec!(130)),
                PerformancePoint::new(day(2024, 1, 1), dec!(100)),
            ],
            btc_series: vec![PerformancePoint::new(day(2024, 6, 8), dec!(65000))],
            eth_series: vec![],
            allocation: Some(AllocationSnapshot {
                as_of_date: day(2024, 6, 1),
                items: vec![AllocationItem {
                    asset: "BTC".to_string(),
                    weight: dec!(0.6),
                }],
                cash_weight: dec!(0.4),
            }),
            change_log_events: vec![ChangeLogEvent {
                id: "evt-1".to_string(),
                date: day(2024, 3, 1),
                title: "Rebalanced".to_string(),
                summary: "Trimmed BTC exposure.".to_string(),
                link: None,
            }],
        }
    }

    #[test]
    fn builds_metrics_validation_and_sorted_series() {
        let payload = DashboardBuilder::default().build(sample_data(), day(2024, 6, 10));

        assert_eq!(payload.metrics.roi_since_inception_pct, dec!(30));
        assert_eq!(payload.metrics.invested_pct, dec!(60));
        assert_eq!(payload.metrics.cash_pct, dec!(40));
        assert_eq!(payload.metrics.last_updated_at, Some(day(2024, 6, 8)));
        assert_eq!(payload.metrics.as_of_date, Some(day(2024, 6, 1)));

        assert_eq!(payload.series.model[0].date, day(2024, 1, 1));
        assert_eq!(payload.change_log_events.len(), 1);

        assert!(payload.validation.is_publishable());
        assert_eq!(
            payload.validation.warnings,
            vec!["ETH benchmark series is empty.".to_string()]
        );
    }

    #[test]
    fn config_flows_into_calculators() {
        let mut config = Config::default();
        config.metrics = MetricsSettings {
            trailing_window_days: 400,
        };
        config.validation.stale_after_days = 0;

        let payload = DashboardBuilder::new(&config).build(sample_data(), day(2024, 6, 10));
        assert_eq!(payload.metrics.roi_last_30_days_pct, dec!(30));
        // Model and BTC are both two days old.
        assert_eq!(payload.validation.warnings.len(), 3);
    }

    #[test]
    fn payload_json_uses_dashboard_shape() {
        let payload = DashboardBuilder::default().build(sample_data(), day(2024, 6, 10));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["series"]["model"][1]["value"], serde_json::json!(130.0));
        assert_eq!(json["allocation"]["cashWeight"], serde_json::json!(0.4));
        assert_eq!(json["changeLogEvents"][0]["title"], serde_json::json!("Rebalanced"));
        assert_eq!(json["metrics"]["maxDrawdownPct"], serde_json::json!(0.0));
        assert!(json["validation"]["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn data_bundle_deserializes_with_missing_sections() {
        let data: DashboardData = serde_json::from_str(
            r#"{"modelSeries":[{"date":"2024-01-01","value":100}]}"#,
        )
        .unwrap();
        assert_eq!(data.model_series.len(), 1);
        assert!(data.settings.is_none());

        let payload = DashboardBuilder::default().build(data, day(2024, 1, 2));
        assert_eq!(
            payload.validation.errors,
            vec!["Dashboard settings are missing.".to_string()]
        );
    }
}
