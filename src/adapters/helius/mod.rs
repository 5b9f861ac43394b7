//! Helius Adapter
//!
//! Enriched Solana RPC used by two commands:
//! - `getAsset` (DAS) for ticker lookup
//! - `getProgramAccounts` filtered on the SPL Token program for holder scans
//!
//! # Example
//!
//! ```rust,ignore
//! use tokenscope::adapters::helius::HeliusClient;
//!
//! let client = HeliusClient::new(std::env::var("HELIUS_API_KEY")?)?;
//! let asset = client.get_asset("6XSMxfh8wAbHMVZ9WA3j6EsyVMyZGD96VHhiU1aBpump").await?;
//! ```

mod client;
mod types;

pub use client::{
    asset_request, token_accounts_request, HeliusClient, HeliusConfig, HeliusError,
    DEFAULT_HELIUS_RPC_URL,
};
pub use types::{parse_token_accounts, Asset};
