mod deductions;
mod estate;
mod heirs;
mod rule_table;
mod tax_bracket;
mod tax_result;

pub use deductions::DeductionSnapshot;
pub use estate::EstateSnapshot;
pub use heirs::HeirSnapshot;
pub use rule_table::RuleTable;
pub use tax_bracket::TaxBracket;
pub use tax_result::{LineItem, TaxResult};
