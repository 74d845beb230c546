use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gross asset declaration for the decedent's estate.
///
/// All monetary amounts are in whole New Taiwan Dollars and must be
/// non-negative. Non-taxable land categories are declared here at face value
/// and subtracted later as deductions, so the gross total always equals the
/// raw sum of declared assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateSnapshot {
    /// Assessed value of land and buildings.
    pub real_estate_value: Decimal,
    pub cash_and_savings: Decimal,
    /// Stocks, bonds, and other investments at declared value.
    pub securities: Decimal,
    pub other_assets: Decimal,
    /// Decedent died in the course of official duty, which qualifies the
    /// estate for the elevated exemption amount.
    pub duty_related_death: bool,
}
