use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBracket;

/// Statutory amounts and rate schedule in force for one period.
///
/// All amounts are in whole New Taiwan Dollars. Per-person amounts apply
/// once per eligible heir. Construct via data loading or
/// [`crate::rules::statutory`], then run [`RuleTable::validate`] before
/// handing the table to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// First date on which this table is in force.
    pub effective_from: NaiveDate,
    pub general_exemption: Decimal,
    /// Elevated exemption for death in the course of official duty.
    pub duty_related_exemption: Decimal,
    pub spouse_deduction: Decimal,
    /// Per parent.
    pub parent_deduction: Decimal,
    /// Per lineal descendant, adult or minor (base amount).
    pub lineal_descendant_deduction: Decimal,
    /// Per dependent sibling or grandparent.
    pub sibling_or_grandparent_deduction: Decimal,
    /// Per heir with a severe disability.
    pub disability_deduction: Decimal,
    /// Flat standard funeral deduction.
    pub funeral_deduction: Decimal,
    /// Per remaining year under the age of majority, for minor heirs.
    pub minor_yearly_addition: Decimal,
    pub majority_age: u8,
    /// Ascending rate schedule; the final bracket must be unbounded.
    pub brackets: Vec<TaxBracket>,
}
