//! Domain Layer - Pure logic with no I/O besides the report writer
//!
//! - `age`: mint age outcome and human formatting
//! - `symbol`: ticker selection from DAS asset metadata
//! - `holders`: USD valuation, filtering, ordering and the JSON report

pub mod age;
pub mod symbol;
pub mod holders;

pub use age::{format_age, timestamp_to_utc, MintAge};
pub use symbol::pick_symbol;
pub use holders::{
    format_thousands, report_file_name, value_holders, Holder, HolderReport, HolderReportError,
};
