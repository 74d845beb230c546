//! Rule table validation and selection.
//!
//! A [`RuleTable`](crate::models::RuleTable) is checked once when it is
//! loaded; the calculation engine assumes a valid table and never re-checks
//! during a call.

mod registry;
pub mod statutory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::RuleTable;

pub use registry::RuleTableSet;

/// Errors raised when a rule table or a set of rule tables is malformed.
///
/// These are configuration failures: fatal at load time, never produced by
/// a calculation call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleTableError {
    /// A statutory amount is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },

    /// The rate schedule is empty.
    #[error("rule table effective {0} has no tax brackets")]
    EmptyBrackets(NaiveDate),

    /// A bracket rate is outside (0, 1].
    #[error("bracket {index} rate must be in (0, 1], got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    /// A quick deduction is negative.
    #[error("bracket {index} quick deduction must be non-negative, got {value}")]
    NegativeQuickDeduction { index: usize, value: Decimal },

    /// Upper limits must be strictly ascending.
    #[error("bracket {index} upper limit {limit} does not exceed the previous bracket")]
    BracketsNotAscending { index: usize, limit: Decimal },

    /// An unbounded bracket appears before the end of the schedule.
    #[error("only the final bracket may be unbounded, found unbounded bracket {index}")]
    UnboundedBracketNotLast { index: usize },

    /// The schedule does not end with an unbounded bracket.
    #[error("final bracket must be unbounded")]
    MissingUnboundedBracket,

    /// A rule table set was constructed with no tables.
    #[error("rule table set is empty")]
    NoTables,

    /// Two tables share the same effective date.
    #[error("duplicate rule table effective {0}")]
    DuplicateEffectiveDate(NaiveDate),
}

impl RuleTable {
    /// Checks the statutory amounts and the rate schedule invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: a negative amount, an empty
    /// schedule, a rate outside (0, 1], a negative quick deduction, upper
    /// limits not strictly ascending, or a bounded final bracket.
    pub fn validate(&self) -> Result<(), RuleTableError> {
        let amounts = [
            ("general exemption", self.general_exemption),
            ("duty-related exemption", self.duty_related_exemption),
            ("spouse deduction", self.spouse_deduction),
            ("parent deduction", self.parent_deduction),
            (
                "lineal descendant deduction",
                self.lineal_descendant_deduction,
            ),
            (
                "sibling or grandparent deduction",
                self.sibling_or_grandparent_deduction,
            ),
            ("disability deduction", self.disability_deduction),
            ("funeral deduction", self.funeral_deduction),
            ("minor yearly addition", self.minor_yearly_addition),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(RuleTableError::NegativeAmount { field, value });
            }
        }

        if self.brackets.is_empty() {
            return Err(RuleTableError::EmptyBrackets(self.effective_from));
        }

        let last_index = self.brackets.len() - 1;
        let mut previous_limit: Option<Decimal> = None;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate <= Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(RuleTableError::InvalidRate {
                    index,
                    rate: bracket.rate,
                });
            }
            if bracket.quick_deduction < Decimal::ZERO {
                return Err(RuleTableError::NegativeQuickDeduction {
                    index,
                    value: bracket.quick_deduction,
                });
            }
            match bracket.upper_limit {
                Some(limit) => {
                    if previous_limit.is_some_and(|prev| limit <= prev) {
                        return Err(RuleTableError::BracketsNotAscending { index, limit });
                    }
                    previous_limit = Some(limit);
                }
                None if index != last_index => {
                    return Err(RuleTableError::UnboundedBracketNotLast { index });
                }
                None => {}
            }
        }

        if self.brackets[last_index].upper_limit.is_some() {
            return Err(RuleTableError::MissingUnboundedBracket);
        }

        Ok(())
    }
}
