pub mod rpc;

pub use rpc::{SolanaClient, SolanaClientError};
