//! End-to-end tests over the shipped statutory data files: load, validate,
//! and run calculations through the engine.

use chrono::NaiveDate;
use estate_core::calculations::EstateTaxWorksheet;
use estate_core::models::{DeductionSnapshot, EstateSnapshot, HeirSnapshot};
use estate_core::rules::statutory::roc_year_114;
use estate_data::RuleTableLoader;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const TABLES_CSV: &str = include_str!("../data/rule_tables.csv");
const BRACKETS_CSV: &str = include_str!("../data/tax_brackets.csv");

fn load_shipped_set() -> estate_core::rules::RuleTableSet {
    let tables = RuleTableLoader::parse_tables(TABLES_CSV.as_bytes()).expect("Failed to parse");
    let brackets =
        RuleTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse");
    RuleTableLoader::assemble(&tables, &brackets).expect("Failed to assemble")
}

#[test]
fn shipped_data_matches_builtin_statutory_table() {
    let set = load_shipped_set();

    assert_eq!(set.len(), 1);
    assert_eq!(set.latest(), &roc_year_114());
}

#[test]
fn shipped_data_selected_by_date_of_death() {
    let set = load_shipped_set();
    let date_of_death = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    let table = set.in_force_on(date_of_death).expect("table in force");

    assert_eq!(
        table.effective_from,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    );
}

#[test]
fn calculation_through_loaded_table() {
    let set = load_shipped_set();
    let worksheet = EstateTaxWorksheet::new(set.latest());

    let estate = EstateSnapshot {
        cash_and_savings: dec!(100_000_000),
        ..Default::default()
    };
    let heirs = HeirSnapshot {
        has_spouse: true,
        minor_children_ages: vec![10],
        ..Default::default()
    };
    let deductions = DeductionSnapshot {
        funeral_standard_elected: true,
        ..Default::default()
    };

    let result = worksheet
        .calculate(&estate, &heirs, &deductions)
        .expect("well-formed inputs");

    assert_eq!(result.exemption_amount, dec!(13_330_000));
    assert_eq!(result.deduction_amount, dec!(11_950_000));
    assert_eq!(result.taxable_estate_value, dec!(74_720_000));
    assert_eq!(result.tax_bracket_rate, dec!(0.15));
    assert_eq!(result.final_tax_payable, dec!(8_397_500));
}

#[test]
fn boundary_tax_agrees_across_loaded_brackets() {
    let set = load_shipped_set();
    let table = set.latest();

    for pair in table.brackets.windows(2) {
        let boundary = pair[0].upper_limit.expect("bounded lower bracket");
        let lower = boundary * pair[0].rate - pair[0].quick_deduction;
        let upper = boundary * pair[1].rate - pair[1].quick_deduction;
        assert_eq!(lower, upper, "discontinuity at {boundary}");
    }
}
