//! Symbol Resolver

use crate::domain::pick_symbol;
use crate::ports::AssetMetadataPort;

pub struct SymbolResolver<A> {
    assets: A,
}

impl<A: AssetMetadataPort> SymbolResolver<A> {
    pub fn new(assets: A) -> Self {
        Self { assets }
    }

    /// Ticker for `address`, or the address itself when the lookup fails or
    /// the asset carries no symbol
    pub async fn resolve(&self, address: &str) -> String {
        match self.assets.asset_symbols(address).await {
            Ok(symbols) => pick_symbol(&symbols, address),
            Err(e) => {
                tracing::warn!(address, error = %e, "Asset lookup failed, echoing address");
                address.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::MockAssetMetadata;
    use crate::ports::{AssetSymbols, SourceError};

    const ADDR: &str = "6XSMxfh8wAbHMVZ9WA3j6EsyVMyZGD96VHhiU1aBpump";

    #[tokio::test]
    async fn test_resolves_symbol() {
        let resolver = SymbolResolver::new(MockAssetMetadata::new(Ok(AssetSymbols {
            metadata_symbol: Some("ABC".to_string()),
            token_info_symbol: None,
        })));
        assert_eq!(resolver.resolve(ADDR).await, "ABC");
        assert_eq!(resolver.assets.get_calls(), vec![ADDR.to_string()]);
    }

    #[tokio::test]
    async fn test_single_request_on_fallback() {
        let resolver = SymbolResolver::new(MockAssetMetadata::new(Ok(AssetSymbols::default())));
        assert_eq!(resolver.resolve(ADDR).await, ADDR);
        assert_eq!(resolver.assets.get_calls().len(), 1);
    }

    #[test]
    fn test_lookup_error_echoes_address() {
        let resolver = SymbolResolver::new(MockAssetMetadata::new(Err(SourceError::Transport(
            "timed out".to_string(),
        ))));
        assert_eq!(tokio_test::block_on(resolver.resolve(ADDR)), ADDR);
    }
}
