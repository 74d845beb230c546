//! Estate tax calculation logic.
//!
//! The engine is a pure function over three input snapshots and a rule
//! table: no I/O, no shared state, a fresh result per call.

pub mod common;
pub mod estate_tax;

pub use estate_tax::{EstateTaxError, EstateTaxWorksheet};
