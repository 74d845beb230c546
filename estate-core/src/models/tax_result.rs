use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One labeled amount in the itemized breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Fully itemized outcome of one calculation.
///
/// Every field is derived from the inputs; a fresh result is produced per
/// call. The breakdown lists are ordered as emitted and that order is
/// display-meaningful, so consumers must preserve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Raw sum of the declared asset values.
    pub total_estate_value: Decimal,
    /// Gross estate minus exemption and deductions, floored at zero.
    pub taxable_estate_value: Decimal,
    pub exemption_amount: Decimal,
    pub deduction_amount: Decimal,
    /// Taxable value times the bracket rate, before the progressive
    /// difference. Informational only.
    pub gross_tax: Decimal,
    pub tax_bracket_rate: Decimal,
    /// Quick deduction of the selected bracket.
    pub progressive_difference: Decimal,
    /// Floored at zero.
    pub final_tax_payable: Decimal,
    /// Always exactly one entry, labeled by the exemption branch taken.
    pub exemption_details: Vec<LineItem>,
    /// One entry per deduction category that was triggered.
    pub deduction_details: Vec<LineItem>,
}
