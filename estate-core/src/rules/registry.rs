use chrono::NaiveDate;

use crate::models::RuleTable;

use super::RuleTableError;

/// Rule tables for successive statutory periods, keyed by effective date.
///
/// Construction validates every table and sorts them ascending by
/// `effective_from`, so selection is a reverse scan for the latest table in
/// force on a given date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTableSet {
    tables: Vec<RuleTable>,
}

impl RuleTableSet {
    /// Builds a set from validated tables.
    ///
    /// # Errors
    ///
    /// Returns [`RuleTableError::NoTables`] for an empty input,
    /// [`RuleTableError::DuplicateEffectiveDate`] when two tables share an
    /// effective date, or the first validation failure of any table.
    pub fn new(mut tables: Vec<RuleTable>) -> Result<Self, RuleTableError> {
        if tables.is_empty() {
            return Err(RuleTableError::NoTables);
        }
        for table in &tables {
            table.validate()?;
        }
        tables.sort_by_key(|t| t.effective_from);
        for pair in tables.windows(2) {
            if pair[0].effective_from == pair[1].effective_from {
                return Err(RuleTableError::DuplicateEffectiveDate(
                    pair[0].effective_from,
                ));
            }
        }
        Ok(Self { tables })
    }

    /// Returns the table in force on `date`: the latest table whose
    /// effective date is on or before it. `None` when the date precedes
    /// every table.
    pub fn in_force_on(&self, date: NaiveDate) -> Option<&RuleTable> {
        self.tables
            .iter()
            .rev()
            .find(|table| table.effective_from <= date)
    }

    /// Returns the most recent table. The constructor guarantees at least
    /// one table exists.
    pub fn latest(&self) -> &RuleTable {
        &self.tables[self.tables.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleTable> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
