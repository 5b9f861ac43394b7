//! Ticker selection for DAS assets

use crate::ports::AssetSymbols;

/// Pick the display ticker for an asset.
///
/// `content.metadata.symbol` wins over `token_info.symbol`; blank values
/// count as missing. Falls back to the address itself.
pub fn pick_symbol(symbols: &AssetSymbols, address: &str) -> String {
    [&symbols.metadata_symbol, &symbols.token_info_symbol]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| address.to_string())
}
