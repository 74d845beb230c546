use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Elective and declared deduction inputs.
///
/// All monetary amounts are in whole New Taiwan Dollars and must be
/// non-negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSnapshot {
    /// Apply the flat statutory funeral deduction.
    pub funeral_standard_elected: bool,
    /// Actual funeral cost as declared. Captured for the record only; the
    /// flat statutory amount is the sole funeral figure applied to the
    /// total, pending clarification of the itemized alternative.
    pub funeral_expenses_actual: Decimal,
    /// Debts of the decedent outstanding at death.
    pub outstanding_debts: Decimal,
    /// Taxes due but unpaid at death.
    pub unpaid_taxes: Decimal,
    /// Public facility reserved land, included in gross and deducted here.
    pub public_reserved_land_value: Decimal,
    /// Agricultural land in continued agricultural use.
    pub agricultural_land_value: Decimal,
}
