pub mod calculations;
pub mod models;
pub mod rules;

pub use calculations::{EstateTaxError, EstateTaxWorksheet};
pub use models::*;
pub use rules::{RuleTableError, RuleTableSet};
