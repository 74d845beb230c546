use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the progressive rate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of taxable value; `None` for the top bracket.
    pub upper_limit: Option<Decimal>,
    /// Marginal rate as a decimal (e.g. 0.10 for 10%).
    pub rate: Decimal,
    /// Precomputed progressive difference, so that
    /// `tax = taxable * rate - quick_deduction` matches the full
    /// marginal-bracket summation.
    pub quick_deduction: Decimal,
}
