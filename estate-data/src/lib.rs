//! Rule table data loading.
//!
//! Parses statutory rule tables and their rate schedules from CSV files and
//! assembles them into a validated
//! [`RuleTableSet`](estate_core::rules::RuleTableSet) keyed by effective
//! date.

mod loader;

pub use loader::{BracketRecord, RuleDataError, RuleTableLoader, RuleTableRecord};
