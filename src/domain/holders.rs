//! Holder Valuation
//!
//! Turns raw token account balances into USD-valued holder records, filters
//! them by a minimum value and persists the result as a JSON report.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ports::TokenAccountRecord;

/// Characters of the mint address used in the report file name
pub const FILE_PREFIX_LEN: usize = 8;

#[derive(Error, Debug)]
pub enum HolderReportError {
    #[error("Failed to serialize holder report: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write holder report {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A token account valued in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub owner: String,
    pub token_amount: f64,
    pub usd_value: f64,
}

/// Value every account at `price`, keep those worth at least
/// `min_usd_value` and order them by value, largest first.
///
/// The sort is stable, so equally valued holders keep scan order.
pub fn value_holders(accounts: &[TokenAccountRecord], price: f64, min_usd_value: f64) -> Vec<Holder> {
    let mut holders: Vec<Holder> = accounts
        .iter()
        .map(|acc| Holder {
            owner: acc.owner.clone(),
            token_amount: acc.ui_amount,
            usd_value: acc.ui_amount * price,
        })
        .filter(|h| h.usd_value >= min_usd_value)
        .collect();

    holders.sort_by(|a, b| b.usd_value.total_cmp(&a.usd_value));
    holders
}

/// JSON document written by the holder scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderReport {
    pub token_address: String,
    pub min_usd_value: f64,
    pub total_holders: usize,
    pub holders: Vec<Holder>,
}

impl HolderReport {
    pub fn new(token_address: impl Into<String>, min_usd_value: f64, holders: Vec<Holder>) -> Self {
        Self {
            token_address: token_address.into(),
            min_usd_value,
            total_holders: holders.len(),
            holders,
        }
    }

    /// `token_holders_<mint prefix>_min<threshold>usd.json`
    pub fn file_name(&self) -> String {
        report_file_name(&self.token_address, self.min_usd_value)
    }

    /// Write the report as pretty JSON into `dir`, returning the full path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, HolderReportError> {
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&path, json).map_err(|source| HolderReportError::WriteError {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Report file name for a mint and threshold
pub fn report_file_name(token_address: &str, min_usd_value: f64) -> String {
    let prefix: String = token_address.chars().take(FILE_PREFIX_LEN).collect();
    format!("token_holders_{}_min{}usd.json", prefix, min_usd_value)
}

/// Format a number with thousands separators and two decimals (`1,234.50`)
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}
