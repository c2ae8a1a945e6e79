use core_types::AllocationSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invested versus cash share of the portfolio, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSplit {
    pub invested_pct: Decimal,
    pub cash_pct: Decimal,
}

/// Converts an allocation snapshot into an invested / cash split.
///
/// Only `cash_weight` is used; it is clamped to `[0, 1]`. A missing snapshot yields
/// `0` / `0`.
pub fn calculate_allocation_split(allocation: Option<&AllocationSnapshot>) -> AllocationSplit {
    let Some(allocation) = allocation else {
        return AllocationSplit::default();
    };

    let cash_pct = allocation.cash_weight.clamp(Decimal::ZERO, Decimal::ONE) * Decimal::ONE_HUNDRED;
    let invested_pct = (Decimal::ONE_HUNDRED - cash_pct).max(Decimal::ZERO);

    AllocationSplit {
        invested_pct,
        cash_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::AllocationItem;
    use rust_decimal_macros::dec;

    fn snapshot(cash_weight: Decimal) -> AllocationSnapshot {
        AllocationSnapshot {
            as_of_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            items: vec![AllocationItem {
                asset: "BTC".to_string(),
                weight: dec!(0.7),
            }],
            cash_weight,
        }
    }

    #[test]
    fn missing_allocation_is_zero_zero() {
        assert_eq!(
            calculate_allocation_split(None),
            AllocationSplit {
                invested_pct: Decimal::ZERO,
                cash_pct: Decimal::ZERO
            }
        );
    }

    #[test]
    fn cash_weight_drives_the_split() {
        let split = calculate_allocation_split(Some(&snapshot(dec!(0.3))));
        assert_eq!(split.cash_pct, dec!(30));
        assert_eq!(split.invested_pct, dec!(70));
    }

    #[test]
    fn cash_weight_is_clamped() {
        let split = calculate_allocation_split(Some(&snapshot(dec!(1.4))));
        assert_eq!(split.cash_pct, dec!(100));
        assert_eq!(split.invested_pct, dec!(0));

        let split = calculate_allocation_split(Some(&snapshot(dec!(-0.2))));
        assert_eq!(split.cash_pct, dec!(0));
        assert_eq!(split.invested_pct, dec!(100));
    }
}
