//! Helius Wire Types
//!
//! JSON-RPC envelopes plus the parts of `getAsset` and `getProgramAccounts`
//! responses the commands read.

use serde::Deserialize;
use serde_json::Value;

use crate::ports::{AssetSymbols, TokenAccountRecord};

/// Generic JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

// ---------------------------------------------------------------------------
// getAsset
// ---------------------------------------------------------------------------

/// DAS asset, reduced to the ticker locations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub content: Option<AssetContent>,
    #[serde(default)]
    pub token_info: Option<AssetTokenInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetContent {
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetTokenInfo {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

impl From<Asset> for AssetSymbols {
    fn from(asset: Asset) -> Self {
        Self {
            metadata_symbol: asset
                .content
                .and_then(|c| c.metadata)
                .and_then(|m| m.symbol),
            token_info_symbol: asset.token_info.and_then(|t| t.symbol),
        }
    }
}

// ---------------------------------------------------------------------------
// getProgramAccounts (jsonParsed SPL token accounts)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramAccount {
    pub pubkey: String,
    pub account: ProgramAccountData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramAccountData {
    pub data: ParsedAccountData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccountData {
    pub parsed: ParsedTokenAccount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedTokenAccount {
    pub info: TokenAccountInfo,
}

/// `info` of a parsed SPL token account
#[derive(Debug, Clone, Deserialize)]
pub struct TokenAccountInfo {
    pub owner: String,
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(rename = "tokenAmount")]
    pub token_amount: UiTokenAmount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiTokenAmount {
    #[serde(rename = "uiAmount")]
    pub ui_amount: Option<f64>,
    #[serde(rename = "uiAmountString", default)]
    pub ui_amount_string: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

impl UiTokenAmount {
    /// `uiAmount`, or `uiAmountString` when the node left the float null.
    /// Non-finite amounts (`"inf"`, `"NaN"`) count as missing.
    pub fn value(&self) -> Option<f64> {
        self.ui_amount
            .or_else(|| {
                self.ui_amount_string
                    .as_deref()
                    .and_then(|s| s.parse::<f64>().ok())
            })
            .filter(|v| v.is_finite())
    }
}

/// Parse a `getProgramAccounts` result, skipping entries that do not look
/// like parsed token accounts
pub fn parse_token_accounts(entries: Vec<Value>) -> Vec<TokenAccountRecord> {
    let total = entries.len();
    let mut records = Vec::with_capacity(total);

    for (index, entry) in entries.into_iter().enumerate() {
        let account: ProgramAccount = match serde_json::from_value(entry) {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed token account");
                continue;
            }
        };

        let info = account.account.data.parsed.info;
        match info.token_amount.value() {
            Some(amount) => records.push(TokenAccountRecord::new(info.owner, amount)),
            None => {
                tracing::warn!(account = %account.pubkey, "Skipping token account without a UI amount");
            }
        }
    }

    if records.len() < total {
        tracing::info!(parsed = records.len(), total, "Some token accounts were skipped");
    }
    records
}
