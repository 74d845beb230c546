//! Built-in statutory rule tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{RuleTable, TaxBracket};

/// Estate tax amounts and rate schedule in force from 1 January 2025
/// (ROC year 114 adjustments). All amounts in whole New Taiwan Dollars.
pub fn roc_year_114() -> RuleTable {
    RuleTable {
        effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid calendar date"),
        general_exemption: dec!(13_330_000),
        duty_related_exemption: dec!(26_660_000),
        spouse_deduction: dec!(5_530_000),
        parent_deduction: dec!(1_380_000),
        lineal_descendant_deduction: dec!(560_000),
        sibling_or_grandparent_deduction: dec!(560_000),
        disability_deduction: dec!(6_930_000),
        funeral_deduction: dec!(1_380_000),
        minor_yearly_addition: dec!(560_000),
        majority_age: 18,
        brackets: vec![
            TaxBracket {
                upper_limit: Some(dec!(56_210_000)),
                rate: dec!(0.10),
                quick_deduction: Decimal::ZERO,
            },
            TaxBracket {
                upper_limit: Some(dec!(112_420_000)),
                rate: dec!(0.15),
                quick_deduction: dec!(2_810_500),
            },
            TaxBracket {
                upper_limit: None,
                rate: dec!(0.20),
                quick_deduction: dec!(8_431_500),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn roc_year_114_schedule_shape() {
        let table = roc_year_114();

        assert_eq!(table.brackets.len(), 3);
        assert_eq!(table.brackets[0].upper_limit, Some(dec!(56_210_000)));
        assert_eq!(table.brackets[2].upper_limit, None);
        assert_eq!(table.majority_age, 18);
    }

    #[test]
    fn quick_deductions_make_schedule_continuous() {
        let table = roc_year_114();

        // At each boundary the lower and upper bracket formulas must agree.
        for pair in table.brackets.windows(2) {
            let boundary = pair[0].upper_limit.expect("bounded lower bracket");
            let lower = boundary * pair[0].rate - pair[0].quick_deduction;
            let upper = boundary * pair[1].rate - pair[1].quick_deduction;
            assert_eq!(lower, upper, "discontinuity at {boundary}");
        }
    }
}
