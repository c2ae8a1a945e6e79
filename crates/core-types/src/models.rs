use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One sample of a time series: a portfolio NAV index or a benchmark price index.
///
/// A valid series only contains strictly positive values. Construction does not enforce
/// this (the validator reports violations); `parse` does, since it is an ingestion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl PerformancePoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }

    /// Builds a point from raw `YYYY-MM-DD` and numeric strings.
    pub fn parse(date: &str, value: &str) -> Result<Self, CoreError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| CoreError::InvalidInput("date".to_string(), e.to_string()))?;
        let value = Decimal::from_str(value.trim())
            .or_else(|_| Decimal::from_scientific(value.trim()))
            .map_err(|e| CoreError::InvalidInput("value".to_string(), e.to_string()))?;
        if value <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "value".to_string(),
                format!("{value} is not a positive number"),
            ));
        }
        Ok(Self { date, value })
    }
}

/// A single non-cash holding in an allocation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationItem {
    pub asset: String,
    /// Fraction of the portfolio in `[0, 1]`.
    pub weight: Decimal,
}

/// Point-in-time breakdown of portfolio weight across assets and cash.
///
/// `cash_weight + sum(items.weight)` is expected to be `1.0`; the validation engine checks
/// this, construction does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSnapshot {
    pub as_of_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<AllocationItem>,
    pub cash_weight: Decimal,
}

impl AllocationSnapshot {
    /// Sum of the cash weight and every item weight, or `None` if the sum overflows.
    pub fn total_weight(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(self.cash_weight, |acc, item| acc.checked_add(item.weight))
    }
}

/// Dashboard configuration as stored by the host application. Only its presence matters
/// to the calculators; the fields are passed through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    #[serde(default)]
    pub inception_date: Option<NaiveDate>,
    #[serde(default)]
    pub disclaimer_text: String,
    #[serde(default = "enabled")]
    pub show_benchmarks: bool,
    #[serde(default = "enabled")]
    pub show_simulator: bool,
    #[serde(default = "enabled")]
    pub show_change_log: bool,
    #[serde(default = "enabled")]
    pub show_allocation: bool,
}

fn enabled() -> bool {
    true
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            inception_date: None,
            disclaimer_text: String::new(),
            show_benchmarks: true,
            show_simulator: true,
            show_change_log: true,
            show_allocation: true,
        }
    }
}

/// A narrative event on the dashboard timeline. Never computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_accepts_iso_date_and_positive_value() {
        let point = PerformancePoint::parse(" 2024-03-01 ", "101.25").unwrap();
        assert_eq!(point.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(point.value, dec!(101.25));
    }

    #[test]
    fn parse_accepts_scientific_notation() {
        let point = PerformancePoint::parse("2024-03-01", "1.5e2").unwrap();
        assert_eq!(point.value, dec!(150));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            PerformancePoint::parse("2024/03/01", "100"),
            Err(CoreError::InvalidInput(field, _)) if field == "date"
        ));
        assert!(matches!(
            PerformancePoint::parse("2024-03-01", "abc"),
            Err(CoreError::InvalidInput(field, _)) if field == "value"
        ));
        assert!(PerformancePoint::parse("2024-03-01", "0").is_err());
        assert!(PerformancePoint::parse("2024-03-01", "-4").is_err());
    }

    #[test]
    fn total_weight_includes_cash() {
        let snapshot = AllocationSnapshot {
            as_of_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            items: vec![
                AllocationItem { asset: "BTC".to_string(), weight: dec!(0.5) },
                AllocationItem { asset: "ETH".to_string(), weight: dec!(0.2) },
            ],
            cash_weight: dec!(0.3),
        };
        assert_eq!(snapshot.total_weight(), Some(dec!(1.0)));
    }

    #[test]
    fn total_weight_overflow_is_none() {
        let snapshot = AllocationSnapshot {
            as_of_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            items: vec![AllocationItem { asset: "BTC".to_string(), weight: Decimal::MAX }],
            cash_weight: Decimal::MAX,
        };
        assert_eq!(snapshot.total_weight(), None);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{"disclaimerText":"Past performance..."}"#).unwrap();
        assert_eq!(settings.disclaimer_text, "Past performance...");
        assert!(settings.show_benchmarks);
        assert!(settings.inception_date.is_none());
    }

    #[test]
    fn snapshot_uses_camel_case_and_float_numbers() {
        let snapshot: AllocationSnapshot = serde_json::from_str(
            r#"{"asOfDate":"2024-03-01","items":[{"asset":"BTC","weight":0.7}],"cashWeight":0.3}"#,
        )
        .unwrap();
        assert_eq!(snapshot.cash_weight, dec!(0.3));
        assert_eq!(snapshot.items[0].weight, dec!(0.7));
    }
}
