//! Shared helpers for tax calculations.

use rust_decimal::Decimal;

/// Rounds a value to a whole currency unit using half-up rounding.
///
/// Amounts are declared in whole New Taiwan Dollars, but a rate product can
/// carry a fractional part; values at exactly 0.5 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estate_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(123.4)), dec!(123));
/// assert_eq!(round_to_unit(dec!(123.5)), dec!(124));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_to_unit_rounds_down_below_midpoint() {
        let result = round_to_unit(dec!(123.4));

        assert_eq!(result, dec!(123));
    }

    #[test]
    fn round_to_unit_rounds_up_at_midpoint() {
        let result = round_to_unit(dec!(123.5));

        assert_eq!(result, dec!(124));
    }

    #[test]
    fn round_to_unit_preserves_whole_values() {
        let result = round_to_unit(dec!(56210000));

        assert_eq!(result, dec!(56210000));
    }

    #[test]
    fn round_to_unit_handles_zero() {
        let result = round_to_unit(dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn max_returns_larger_value() {
        let result = max(dec!(100), dec!(200));

        assert_eq!(result, dec!(200));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        let result = max(dec!(-50), dec!(0));

        assert_eq!(result, dec!(0));
    }
}
