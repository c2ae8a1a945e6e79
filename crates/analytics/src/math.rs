use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `end / start`, or zero when the baseline is not positive or the division overflows.
pub fn growth_ratio(start: Decimal, end: Decimal) -> Decimal {
    if start <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    end.checked_div(start).unwrap_or(Decimal::ZERO)
}

/// Percentage change `(end / start - 1) * 100`, or zero for a degenerate baseline.
pub fn pct_change(start: Decimal, end: Decimal) -> Decimal {
    if start <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    end.checked_div(start)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|change| change.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pct_change_is_ratio_based() {
        assert_eq!(pct_change(dec!(100), dec!(150)), dec!(50));
        assert_eq!(pct_change(dec!(200), dec!(150)), dec!(-25));
    }

    #[test]
    fn degenerate_baseline_resolves_to_zero() {
        assert_eq!(pct_change(Decimal::ZERO, dec!(150)), Decimal::ZERO);
        assert_eq!(pct_change(dec!(-3), dec!(150)), Decimal::ZERO);
        assert_eq!(growth_ratio(Decimal::ZERO, dec!(10)), Decimal::ZERO);
    }

    #[test]
    fn overflow_resolves_to_zero() {
        assert_eq!(pct_change(dec!(0.0000000000000000000000000001), Decimal::MAX), Decimal::ZERO);
    }
}
