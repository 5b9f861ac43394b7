//! Market Data Adapters
//!
//! - `JupiterPriceClient`: Jupiter Price API v3 client for USD prices

mod jupiter_price;

pub use jupiter_price::{JupiterPriceClient, PriceError, JUPITER_PRICE_API, WSOL_MINT};
