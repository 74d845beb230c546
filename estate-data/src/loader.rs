use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use estate_core::models::{RuleTable, TaxBracket};
use estate_core::rules::{RuleTableError, RuleTableSet};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading rule table data.
#[derive(Debug, Error)]
pub enum RuleDataError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("no rule table rows found")]
    NoRuleTables,

    #[error("no bracket rows found for rule table effective {0}")]
    MissingBrackets(NaiveDate),

    #[error("bracket row effective {0} has no matching rule table row")]
    OrphanBracket(NaiveDate),

    #[error("invalid rule table: {0}")]
    Invalid(#[from] RuleTableError),
}

impl From<csv::Error> for RuleDataError {
    fn from(err: csv::Error) -> Self {
        RuleDataError::CsvParse(err.to_string())
    }
}

/// A single row from the rule tables CSV file: the statutory amounts in
/// force from one effective date.
///
/// Columns, all amounts in whole currency units:
/// - `effective_from`: ISO date (e.g. 2025-01-01)
/// - `general_exemption`, `duty_related_exemption`
/// - `spouse_deduction`, `parent_deduction`, `lineal_descendant_deduction`,
///   `sibling_or_grandparent_deduction`, `disability_deduction`,
///   `funeral_deduction`
/// - `minor_yearly_addition`, `majority_age`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RuleTableRecord {
    pub effective_from: NaiveDate,
    pub general_exemption: Decimal,
    pub duty_related_exemption: Decimal,
    pub spouse_deduction: Decimal,
    pub parent_deduction: Decimal,
    pub lineal_descendant_deduction: Decimal,
    pub sibling_or_grandparent_deduction: Decimal,
    pub disability_deduction: Decimal,
    pub funeral_deduction: Decimal,
    pub minor_yearly_addition: Decimal,
    pub majority_age: u8,
}

/// A single row from the brackets CSV file.
///
/// Columns:
/// - `effective_from`: ISO date matching a rule table row
/// - `upper_limit`: inclusive upper bound (empty for the unbounded top bracket)
/// - `rate`: marginal rate as a decimal (e.g. 0.10)
/// - `quick_deduction`: precomputed progressive difference
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BracketRecord {
    pub effective_from: NaiveDate,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
    pub quick_deduction: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for rule table data from CSV files.
///
/// Two files describe a statutory period: one row of amounts in the rule
/// tables file and the matching rate schedule rows in the brackets file,
/// joined on `effective_from`. [`RuleTableLoader::assemble`] validates the
/// joined tables, so a loaded set is always safe to hand to the engine.
pub struct RuleTableLoader;

impl RuleTableLoader {
    /// Parse rule table rows from a CSV reader.
    pub fn parse_tables<R: Read>(reader: R) -> Result<Vec<RuleTableRecord>, RuleDataError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RuleTableRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse bracket rows from a CSV reader. Row order within one effective
    /// date is the schedule order and must be ascending.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, RuleDataError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Joins table and bracket rows into a validated [`RuleTableSet`].
    ///
    /// # Errors
    ///
    /// Returns an error when there are no table rows, a table has no
    /// brackets, a bracket row references an unknown effective date, or the
    /// assembled set fails [`RuleTable::validate`] checks (including
    /// duplicate effective dates).
    pub fn assemble(
        tables: &[RuleTableRecord],
        brackets: &[BracketRecord],
    ) -> Result<RuleTableSet, RuleDataError> {
        if tables.is_empty() {
            return Err(RuleDataError::NoRuleTables);
        }

        let mut schedules: BTreeMap<NaiveDate, Vec<TaxBracket>> = BTreeMap::new();
        for record in brackets {
            schedules
                .entry(record.effective_from)
                .or_default()
                .push(TaxBracket {
                    upper_limit: record.upper_limit,
                    rate: record.rate,
                    quick_deduction: record.quick_deduction,
                });
        }

        let known_dates: Vec<NaiveDate> = tables.iter().map(|t| t.effective_from).collect();
        if let Some(&orphan) = schedules.keys().find(|date| !known_dates.contains(date)) {
            return Err(RuleDataError::OrphanBracket(orphan));
        }

        let mut assembled = Vec::with_capacity(tables.len());
        for record in tables {
            let brackets = schedules
                .remove(&record.effective_from)
                .ok_or(RuleDataError::MissingBrackets(record.effective_from))?;
            assembled.push(RuleTable {
                effective_from: record.effective_from,
                general_exemption: record.general_exemption,
                duty_related_exemption: record.duty_related_exemption,
                spouse_deduction: record.spouse_deduction,
                parent_deduction: record.parent_deduction,
                lineal_descendant_deduction: record.lineal_descendant_deduction,
                sibling_or_grandparent_deduction: record.sibling_or_grandparent_deduction,
                disability_deduction: record.disability_deduction,
                funeral_deduction: record.funeral_deduction,
                minor_yearly_addition: record.minor_yearly_addition,
                majority_age: record.majority_age,
                brackets,
            });
        }

        Ok(RuleTableSet::new(assembled)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TABLES_CSV: &str = "\
effective_from,general_exemption,duty_related_exemption,spouse_deduction,parent_deduction,lineal_descendant_deduction,sibling_or_grandparent_deduction,disability_deduction,funeral_deduction,minor_yearly_addition,majority_age
2025-01-01,13330000,26660000,5530000,1380000,560000,560000,6930000,1380000,560000,18
";

    const BRACKETS_CSV: &str = "\
effective_from,upper_limit,rate,quick_deduction
2025-01-01,56210000,0.10,0
2025-01-01,112420000,0.15,2810500
2025-01-01,,0.20,8431500
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_single_rule_table_row() {
        let records =
            RuleTableLoader::parse_tables(TABLES_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            RuleTableRecord {
                effective_from: date(2025, 1, 1),
                general_exemption: dec!(13330000),
                duty_related_exemption: dec!(26660000),
                spouse_deduction: dec!(5530000),
                parent_deduction: dec!(1380000),
                lineal_descendant_deduction: dec!(560000),
                sibling_or_grandparent_deduction: dec!(560000),
                disability_deduction: dec!(6930000),
                funeral_deduction: dec!(1380000),
                minor_yearly_addition: dec!(560000),
                majority_age: 18,
            }
        );
    }

    #[test]
    fn parse_brackets_with_unbounded_top() {
        let records =
            RuleTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].upper_limit, Some(dec!(56210000)));
        assert_eq!(records[2].upper_limit, None);
        assert_eq!(records[2].rate, dec!(0.20));
        assert_eq!(records[2].quick_deduction, dec!(8431500));
    }

    #[test]
    fn parse_rejects_missing_column() {
        let csv = "effective_from,upper_limit\n2025-01-01,56210000";

        let result = RuleTableLoader::parse_brackets(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let RuleDataError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {err:?}");
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {msg}"
        );
    }

    #[test]
    fn parse_rejects_bad_decimal() {
        let csv = "effective_from,upper_limit,rate,quick_deduction\n2025-01-01,abc,0.10,0";

        let result = RuleTableLoader::parse_brackets(csv.as_bytes());

        assert!(matches!(result, Err(RuleDataError::CsvParse(_))));
    }

    #[test]
    fn assemble_builds_validated_set() {
        let tables = RuleTableLoader::parse_tables(TABLES_CSV.as_bytes()).unwrap();
        let brackets = RuleTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();

        let set = RuleTableLoader::assemble(&tables, &brackets).expect("Failed to assemble");

        assert_eq!(set.len(), 1);
        let table = set.latest();
        assert_eq!(table.effective_from, date(2025, 1, 1));
        assert_eq!(table.brackets.len(), 3);
        assert_eq!(table.general_exemption, dec!(13330000));
    }

    #[test]
    fn assemble_rejects_empty_tables() {
        let brackets = RuleTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).unwrap();

        let result = RuleTableLoader::assemble(&[], &brackets);

        assert!(matches!(result, Err(RuleDataError::NoRuleTables)));
    }

    #[test]
    fn assemble_rejects_table_without_brackets() {
        let tables = RuleTableLoader::parse_tables(TABLES_CSV.as_bytes()).unwrap();

        let result = RuleTableLoader::assemble(&tables, &[]);

        match result {
            Err(RuleDataError::MissingBrackets(d)) => assert_eq!(d, date(2025, 1, 1)),
            other => panic!("expected MissingBrackets, got {other:?}"),
        }
    }

    #[test]
    fn assemble_rejects_orphan_bracket_rows() {
        let tables = RuleTableLoader::parse_tables(TABLES_CSV.as_bytes()).unwrap();
        let orphan_csv = format!(
            "{BRACKETS_CSV}2022-01-01,50000000,0.10,0\n2022-01-01,,0.20,5000000\n"
        );
        let brackets = RuleTableLoader::parse_brackets(orphan_csv.as_bytes()).unwrap();

        let result = RuleTableLoader::assemble(&tables, &brackets);

        match result {
            Err(RuleDataError::OrphanBracket(d)) => assert_eq!(d, date(2022, 1, 1)),
            other => panic!("expected OrphanBracket, got {other:?}"),
        }
    }

    #[test]
    fn assemble_surfaces_validation_failures() {
        let tables = RuleTableLoader::parse_tables(TABLES_CSV.as_bytes()).unwrap();
        // Descending limits violate the schedule invariant.
        let bad_csv = "\
effective_from,upper_limit,rate,quick_deduction
2025-01-01,112420000,0.15,2810500
2025-01-01,56210000,0.10,0
2025-01-01,,0.20,8431500
";
        let brackets = RuleTableLoader::parse_brackets(bad_csv.as_bytes()).unwrap();

        let result = RuleTableLoader::assemble(&tables, &brackets);

        assert!(matches!(
            result,
            Err(RuleDataError::Invalid(
                RuleTableError::BracketsNotAscending { index: 1, .. }
            ))
        ));
    }
}
