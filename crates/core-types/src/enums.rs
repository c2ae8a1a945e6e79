use serde::{Deserialize, Serialize};

/// Identifies one of the series shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Model,
    Btc,
    Eth,
}

impl SeriesKind {
    /// Human-readable label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            SeriesKind::Model => "Model portfolio",
            SeriesKind::Btc => "BTC benchmark",
            SeriesKind::Eth => "ETH benchmark",
        }
    }

    /// Benchmarks are optional; only the model series is mandatory.
    pub fn is_benchmark(&self) -> bool {
        !matches!(self, SeriesKind::Model)
    }
}
