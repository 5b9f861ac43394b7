//! Application Layer - One use case per command
//!
//! Each use case is generic over the ports it needs so it can be driven by
//! the real adapters from the CLI or by fakes in tests.

pub mod mint_age;
pub mod symbol;
pub mod holder_scan;

pub use mint_age::{MintAgeFinder, MAX_PAGE_SIZE};
pub use symbol::SymbolResolver;
pub use holder_scan::{HolderScan, HolderScanner};
