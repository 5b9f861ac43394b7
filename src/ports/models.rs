//! Data structures exchanged between ports and the application layer

use serde::{Deserialize, Serialize};

/// One entry of a `getSignaturesForAddress` page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Base58 transaction signature
    pub signature: String,
    /// Slot the transaction landed in
    pub slot: u64,
    /// Unix timestamp of the block, if the node still has it
    pub block_time: Option<i64>,
}

impl SignatureRecord {
    pub fn new(signature: impl Into<String>, slot: u64, block_time: Option<i64>) -> Self {
        Self {
            signature: signature.into(),
            slot,
            block_time,
        }
    }
}

/// Owner and UI balance of a single SPL token account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAccountRecord {
    /// Wallet that controls the token account
    pub owner: String,
    /// Balance adjusted for the mint's decimals
    pub ui_amount: f64,
}

impl TokenAccountRecord {
    pub fn new(owner: impl Into<String>, ui_amount: f64) -> Self {
        Self {
            owner: owner.into(),
            ui_amount,
        }
    }
}

/// The two places a DAS `getAsset` response may carry a ticker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSymbols {
    /// `result.content.metadata.symbol`
    pub metadata_symbol: Option<String>,
    /// `result.token_info.symbol`
    pub token_info_symbol: Option<String>,
}
