use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub metrics: MetricsSettings,
    pub validation: ValidationRules,
    pub logging: LoggingSettings,
}

/// Parameters for the derived dashboard metrics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Length of the trailing ROI window, in calendar days.
    pub trailing_window_days: i64,
}

/// Thresholds applied by the validation engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// A series whose latest point is older than this many days is reported as stale.
    pub stale_after_days: i64,
    /// Absolute tolerance on `cash_weight + sum(item weights) == 1`.
    /// 0.005 corresponds to 0.5%.
    pub weight_tolerance: Decimal,
}

/// Settings for the `tracing` subscriber installed by the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "analytics=debug").
    pub level: String,
}

// --- Default Implementations ---
// These reproduce the dashboard's fixed behaviour, so a missing `roi.toml` is fine.

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            trailing_window_days: 30,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            stale_after_days: 7,
            weight_tolerance: dec!(0.005),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
