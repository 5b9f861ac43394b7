//! Ports Layer - Trait definitions for external data sources
//!
//! Each external API gets its own narrow trait so the use cases in
//! `application` can run against fakes in tests:
//! - Signature history and block times (Solana RPC)
//! - Asset metadata (Helius DAS `getAsset`)
//! - USD prices (Jupiter Price API)
//! - Token account scans (`getProgramAccounts`)

pub mod models;

#[cfg(test)]
pub mod mocks;

use async_trait::async_trait;
use thiserror::Error;

pub use models::{AssetSymbols, SignatureRecord, TokenAccountRecord};

/// Error returned by any data source port
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Network or HTTP-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered with an error object or a bad status
    #[error("Remote error: {0}")]
    Remote(String),

    /// The response could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// An address or signature argument was malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Transaction history of an address, newest first
#[async_trait]
pub trait SignatureHistoryPort: Send + Sync {
    /// Fetch up to `limit` signatures older than `before` (or the newest ones
    /// when `before` is `None`), ordered newest to oldest
    async fn signatures_before(
        &self,
        address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, SourceError>;

    /// Block timestamp for a slot. `Ok(None)` when the node no longer has it.
    async fn block_time(&self, slot: u64) -> Result<Option<i64>, SourceError>;
}

/// Enriched asset metadata lookup
#[async_trait]
pub trait AssetMetadataPort: Send + Sync {
    async fn asset_symbols(&self, address: &str) -> Result<AssetSymbols, SourceError>;
}

/// USD price feed
#[async_trait]
pub trait PricePort: Send + Sync {
    /// Current USD price of `mint`, `Ok(None)` if the feed has no quote for it
    async fn usd_price(&self, mint: &str) -> Result<Option<f64>, SourceError>;
}

/// Filtered scan of all token accounts for a mint
#[async_trait]
pub trait TokenAccountPort: Send + Sync {
    /// Every token account of `mint`. Entries that fail to parse are dropped
    /// by the implementation, not reported as errors.
    async fn token_accounts(&self, mint: &str) -> Result<Vec<TokenAccountRecord>, SourceError>;
}
