//! tokenscope - Solana token inspection library
//!
//! Three independent procedures over public Solana data APIs:
//! mint age (oldest transaction), ticker lookup, and holder scans filtered
//! by USD value.
//!
//! # Modules
//!
//! - `domain`: Pure logic (age formatting, ticker choice, holder valuation)
//! - `ports`: Trait abstractions over each external data source
//! - `application`: One use case per command, generic over ports
//! - `adapters`: Solana RPC, Helius, Jupiter and CLI implementations
//! - `config`: Configuration loading and validation

pub mod domain;
pub mod ports;
pub mod application;
pub mod adapters;
pub mod config;
