use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters of a "what-if" projection, typically from the dashboard form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorInput {
    /// Lump sum invested at the start date. Negative values are treated as zero.
    pub starting_capital: Decimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub include_monthly_contributions: bool,
    /// Amount added on the 1st of every month. Negative values are treated as zero.
    #[serde(default)]
    pub monthly_contribution: Decimal,
}

/// The simulated balance on one series date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationPoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Outcome of a simulation run. All fields are zero when there is no series to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorResult {
    pub series: Vec<SimulationPoint>,
    pub final_balance: Decimal,
    pub total_contributed: Decimal,
    pub profit: Decimal,
    pub roi_pct: Decimal,
    /// Worst decline of the balance from its running peak, in percent (`<= 0`).
    pub max_drawdown_pct: Decimal,
    /// Worst decline of the balance from its running peak, in currency (`<= 0`).
    pub max_drawdown_amount: Decimal,
}
