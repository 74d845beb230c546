//! Estate tax worksheet.
//!
//! Computes the tax liability for one estate declaration in a single
//! synchronous pass:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross estate: sum of the four declared asset values |
//! | 2    | Exemption: duty-related amount if flagged, else general |
//! | 3    | Deduction itemization, one line item per triggered category |
//! | 4    | Taxable estate: gross − exemption − deductions, floored at 0 |
//! | 5    | Bracket lookup: first bracket with inclusive upper limit ≥ taxable |
//! | 6    | Final tax: taxable × rate − quick deduction, floored at 0 |
//! | 7    | Result assembly with the ordered breakdown lists |
//!
//! Non-taxable land categories are part of the gross total and subtracted
//! as deductions, so the displayed gross always equals the raw sum of
//! declared assets.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estate_core::calculations::EstateTaxWorksheet;
//! use estate_core::models::{DeductionSnapshot, EstateSnapshot, HeirSnapshot};
//! use estate_core::rules::statutory::roc_year_114;
//!
//! let rules = roc_year_114();
//! let estate = EstateSnapshot {
//!     cash_and_savings: dec!(100_000_000),
//!     ..Default::default()
//! };
//! let heirs = HeirSnapshot {
//!     has_spouse: true,
//!     minor_children_ages: vec![10],
//!     ..Default::default()
//! };
//! let deductions = DeductionSnapshot {
//!     funeral_standard_elected: true,
//!     ..Default::default()
//! };
//!
//! let worksheet = EstateTaxWorksheet::new(&rules);
//! let result = worksheet.calculate(&estate, &heirs, &deductions).unwrap();
//!
//! assert_eq!(result.taxable_estate_value, dec!(74_720_000));
//! assert_eq!(result.final_tax_payable, dec!(8_397_500));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{max, round_to_unit};
use crate::models::{
    DeductionSnapshot, EstateSnapshot, HeirSnapshot, LineItem, RuleTable, TaxBracket, TaxResult,
};

/// Errors raised for malformed calculation inputs.
///
/// These are caller errors, reported synchronously and never coerced. A
/// well-formed input cannot fail: the worksheet is a total function over
/// non-negative amounts and plausible ages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstateTaxError {
    /// A monetary input is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },

    /// An heir age is above the supported maximum.
    #[error("{field} entry {age} exceeds the supported maximum age of {max}")]
    AgeOutOfRange {
        field: &'static str,
        age: u8,
        max: u8,
    },

    /// The rule table has an empty rate schedule. Validated tables cannot
    /// trigger this.
    #[error("no tax bracket found for taxable value {0}")]
    NoMatchingBracket(Decimal),
}

/// Upper plausibility bound for heir ages.
pub const MAX_HEIR_AGE: u8 = 130;

/// Calculator for one statutory period's estate tax worksheet.
///
/// Borrows a rule table that should already have passed
/// [`RuleTable::validate`](crate::models::RuleTable::validate). The
/// calculation itself is deterministic and side-effect free, so a worksheet
/// may be shared freely across callers.
#[derive(Debug, Clone)]
pub struct EstateTaxWorksheet<'a> {
    rules: &'a RuleTable,
}

impl<'a> EstateTaxWorksheet<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Runs the full worksheet for one declaration.
    ///
    /// # Errors
    ///
    /// Returns [`EstateTaxError`] when a monetary input is negative, an
    /// heir age is implausible, or the rule table has no brackets.
    pub fn calculate(
        &self,
        estate: &EstateSnapshot,
        heirs: &HeirSnapshot,
        deductions: &DeductionSnapshot,
    ) -> Result<TaxResult, EstateTaxError> {
        self.validate_inputs(estate, heirs, deductions)?;

        let total_estate_value = self.gross_estate(estate);
        let (exemption_amount, exemption_line) = self.select_exemption(estate.duty_related_death);
        let (deduction_amount, deduction_details) = self.itemize_deductions(heirs, deductions);

        let taxable_estate_value =
            self.taxable_estate(total_estate_value, exemption_amount, deduction_amount);

        let bracket = self.find_bracket(taxable_estate_value)?;
        let gross_tax = round_to_unit(taxable_estate_value * bracket.rate);
        let final_tax_payable = max(gross_tax - bracket.quick_deduction, Decimal::ZERO);

        Ok(TaxResult {
            total_estate_value,
            taxable_estate_value,
            exemption_amount,
            deduction_amount,
            gross_tax,
            tax_bracket_rate: bracket.rate,
            progressive_difference: bracket.quick_deduction,
            final_tax_payable,
            exemption_details: vec![exemption_line],
            deduction_details,
        })
    }

    fn validate_inputs(
        &self,
        estate: &EstateSnapshot,
        heirs: &HeirSnapshot,
        deductions: &DeductionSnapshot,
    ) -> Result<(), EstateTaxError> {
        let amounts = [
            ("real estate value", estate.real_estate_value),
            ("cash and savings", estate.cash_and_savings),
            ("securities", estate.securities),
            ("other assets", estate.other_assets),
            (
                "actual funeral expenses",
                deductions.funeral_expenses_actual,
            ),
            ("outstanding debts", deductions.outstanding_debts),
            ("unpaid taxes", deductions.unpaid_taxes),
            (
                "public reserved land value",
                deductions.public_reserved_land_value,
            ),
            (
                "agricultural land value",
                deductions.agricultural_land_value,
            ),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EstateTaxError::NegativeAmount { field, value });
            }
        }

        let age_lists = [
            ("minor children ages", &heirs.minor_children_ages),
            ("minor siblings ages", &heirs.minor_siblings_ages),
        ];
        for (field, ages) in age_lists {
            if let Some(&age) = ages.iter().find(|&&age| age > MAX_HEIR_AGE) {
                return Err(EstateTaxError::AgeOutOfRange {
                    field,
                    age,
                    max: MAX_HEIR_AGE,
                });
            }
        }

        Ok(())
    }

    /// Step 1: raw sum of the declared asset values.
    fn gross_estate(
        &self,
        estate: &EstateSnapshot,
    ) -> Decimal {
        estate.real_estate_value
            + estate.cash_and_savings
            + estate.securities
            + estate.other_assets
    }

    /// Step 2: exactly one exemption, chosen by the duty-related flag.
    fn select_exemption(
        &self,
        duty_related_death: bool,
    ) -> (Decimal, LineItem) {
        if duty_related_death {
            (
                self.rules.duty_related_exemption,
                LineItem::new(
                    "Duty-related death exemption",
                    self.rules.duty_related_exemption,
                ),
            )
        } else {
            (
                self.rules.general_exemption,
                LineItem::new("General exemption", self.rules.general_exemption),
            )
        }
    }

    /// Step 3: one line item per triggered category, in display order.
    ///
    /// The flat-count sibling line and the age-prorated minor sibling line
    /// are independent categories and may both fire.
    fn itemize_deductions(
        &self,
        heirs: &HeirSnapshot,
        deductions: &DeductionSnapshot,
    ) -> (Decimal, Vec<LineItem>) {
        let mut details = Vec::new();

        if heirs.has_spouse {
            details.push(LineItem::new(
                "Spouse deduction",
                self.rules.spouse_deduction,
            ));
        }

        if heirs.parents_count > 0 {
            let amount = Decimal::from(heirs.parents_count) * self.rules.parent_deduction;
            details.push(LineItem::new(
                format!("Parents deduction ({})", heirs.parents_count),
                amount,
            ));
        }

        if heirs.adult_children_count > 0 {
            let amount = Decimal::from(heirs.adult_children_count)
                * self.rules.lineal_descendant_deduction;
            details.push(LineItem::new(
                format!(
                    "Adult lineal descendants deduction ({})",
                    heirs.adult_children_count
                ),
                amount,
            ));
        }

        if !heirs.minor_children_ages.is_empty() {
            let amount = self.age_prorated_total(
                self.rules.lineal_descendant_deduction,
                &heirs.minor_children_ages,
                "minor children",
            );
            details.push(LineItem::new(
                format!(
                    "Minor lineal descendants deduction ({}, incl. yearly addition)",
                    heirs.minor_children_ages.len()
                ),
                amount,
            ));
        }

        if heirs.siblings_count > 0 {
            let amount =
                Decimal::from(heirs.siblings_count) * self.rules.sibling_or_grandparent_deduction;
            details.push(LineItem::new(
                format!("Dependent siblings deduction ({})", heirs.siblings_count),
                amount,
            ));
        }

        if !heirs.minor_siblings_ages.is_empty() {
            let amount = self.age_prorated_total(
                self.rules.sibling_or_grandparent_deduction,
                &heirs.minor_siblings_ages,
                "minor siblings",
            );
            details.push(LineItem::new(
                format!(
                    "Minor dependent siblings deduction ({}, incl. yearly addition)",
                    heirs.minor_siblings_ages.len()
                ),
                amount,
            ));
        }

        if heirs.grandparents_count > 0 {
            let amount = Decimal::from(heirs.grandparents_count)
                * self.rules.sibling_or_grandparent_deduction;
            details.push(LineItem::new(
                format!("Grandparents deduction ({})", heirs.grandparents_count),
                amount,
            ));
        }

        if heirs.disabled_dependents_count > 0 {
            let amount =
                Decimal::from(heirs.disabled_dependents_count) * self.rules.disability_deduction;
            details.push(LineItem::new(
                format!(
                    "Severe disability deduction ({})",
                    heirs.disabled_dependents_count
                ),
                amount,
            ));
        }

        // Only the elected flat amount applies; a declared actual funeral
        // cost is recorded but never summed.
        if deductions.funeral_standard_elected {
            details.push(LineItem::new(
                "Funeral expenses deduction",
                self.rules.funeral_deduction,
            ));
        }

        if deductions.outstanding_debts > Decimal::ZERO {
            details.push(LineItem::new(
                "Outstanding debts of the decedent",
                deductions.outstanding_debts,
            ));
        }
        if deductions.unpaid_taxes > Decimal::ZERO {
            details.push(LineItem::new(
                "Unpaid taxes due at death",
                deductions.unpaid_taxes,
            ));
        }
        if deductions.public_reserved_land_value > Decimal::ZERO {
            details.push(LineItem::new(
                "Public facility reserved land",
                deductions.public_reserved_land_value,
            ));
        }
        if deductions.agricultural_land_value > Decimal::ZERO {
            details.push(LineItem::new(
                "Agricultural land in agricultural use",
                deductions.agricultural_land_value,
            ));
        }

        let total = details.iter().map(|item| item.amount).sum();
        (total, details)
    }

    /// Per-heir amount for an age-prorated category: the base amount plus
    /// one yearly addition per remaining year under majority. Ages at or
    /// above majority contribute the base amount only.
    fn age_prorated_total(
        &self,
        base: Decimal,
        ages: &[u8],
        category: &'static str,
    ) -> Decimal {
        let mut total = Decimal::ZERO;
        for &age in ages {
            if age >= self.rules.majority_age {
                warn!(
                    category,
                    age, "age at or above majority in a minor list; base amount only"
                );
            }
            let remaining_years = self.rules.majority_age.saturating_sub(age);
            total += base + Decimal::from(remaining_years) * self.rules.minor_yearly_addition;
        }
        total
    }

    /// Step 4: net taxable estate, floored at zero.
    fn taxable_estate(
        &self,
        total: Decimal,
        exemption: Decimal,
        deductions: Decimal,
    ) -> Decimal {
        max(total - exemption - deductions, Decimal::ZERO)
    }

    /// Step 5: first bracket whose inclusive upper limit covers the taxable
    /// value, falling back to the last bracket.
    fn find_bracket(
        &self,
        taxable: Decimal,
    ) -> Result<&TaxBracket, EstateTaxError> {
        self.rules
            .brackets
            .iter()
            .find(|bracket| bracket.upper_limit.is_none_or(|limit| taxable <= limit))
            .or_else(|| self.rules.brackets.last())
            .ok_or(EstateTaxError::NoMatchingBracket(taxable))
    }
}
