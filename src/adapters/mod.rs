//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Solana: RPC client for signature history and block times
//! - Helius: DAS asset lookup and token account scans
//! - Market Data: Jupiter price feed
//! - CLI: Command-line interface handlers

pub mod solana;
pub mod helius;
pub mod market_data;
pub mod cli;

pub use solana::SolanaClient;
pub use helius::HeliusClient;
pub use market_data::JupiterPriceClient;
pub use cli::CliApp;
