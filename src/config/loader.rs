//! Configuration Loader
//!
//! Loads and validates configuration from a TOML file. Every section and
//! field has a default, so a missing file or a partial file is usable.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::helius::DEFAULT_HELIUS_RPC_URL;
use crate::adapters::market_data::{JUPITER_PRICE_API, WSOL_MINT};
use crate::application::MAX_PAGE_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "config/tokenscope.toml";
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_MINT_AGE_MINT: &str = "6XSMxfh8wAbHMVZ9WA3j6EsyVMyZGD96VHhiU1aBpump";
pub const DEFAULT_HOLDERS_MINT: &str = "5KCspct2KqKm58ZqVJExoihyT1cB8xXAFJt2xxbpump";
pub const DEFAULT_MIN_USD_VALUE: f64 = 8.0;

/// Main configuration structure matching tokenscope.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solana: SolanaSection,
    pub helius: HeliusSection,
    pub jupiter: JupiterSection,
    pub http: HttpSection,
    pub mint_age: MintAgeSection,
    pub symbol: SymbolSection,
    pub holders: HoldersSection,
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolanaSection {
    /// RPC endpoint used for signature history and block times
    pub rpc_url: String,
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_SOLANA_RPC_URL.to_string(),
        }
    }
}

impl SolanaSection {
    /// Get RPC URL with environment variable override
    /// Checks SOLANA_RPC_URL env var first, falls back to config value
    pub fn get_rpc_url(&self) -> String {
        std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| self.rpc_url.clone())
    }
}

/// Helius configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeliusSection {
    pub rpc_url: String,
    /// API key (keep it in .env, not in the config file)
    pub api_key: Option<String>,
}

impl Default for HeliusSection {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_HELIUS_RPC_URL.to_string(),
            api_key: None,
        }
    }
}

impl HeliusSection {
    /// Get API key with environment variable fallback
    /// Checks HELIUS_API_KEY env var if config value is empty/None
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("HELIUS_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

/// Jupiter Price API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JupiterSection {
    /// Price v3 endpoint
    pub price_api_url: String,
    /// Mint requested alongside the target token
    pub reference_mint: String,
}

impl Default for JupiterSection {
    fn default() -> Self {
        Self {
            price_api_url: JUPITER_PRICE_API.to_string(),
            reference_mint: WSOL_MINT.to_string(),
        }
    }
}

/// HTTP transport section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Request timeout in seconds; unset leaves the client default
    pub timeout_secs: Option<u64>,
}

impl HttpSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Mint age command section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MintAgeSection {
    /// Address whose first transaction is looked up
    pub mint: String,
    /// Signatures per getSignaturesForAddress page
    pub page_size: usize,
}

impl Default for MintAgeSection {
    fn default() -> Self {
        Self {
            mint: DEFAULT_MINT_AGE_MINT.to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Symbol command section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SymbolSection {
    /// Address looked up when none is given on the command line
    pub address: String,
}

impl Default for SymbolSection {
    fn default() -> Self {
        Self {
            address: DEFAULT_MINT_AGE_MINT.to_string(),
        }
    }
}

/// Holder scan command section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoldersSection {
    /// Token to scan
    pub mint: String,
    /// Minimum holding value in USD
    pub min_usd_value: f64,
    /// Directory the JSON report is written to
    pub output_dir: String,
}

impl Default for HoldersSection {
    fn default() -> Self {
        Self {
            mint: DEFAULT_HOLDERS_MINT.to_string(),
            min_usd_value: DEFAULT_MIN_USD_VALUE,
            output_dir: ".".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        Ok(Config::default())
    }
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solana.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "solana.rpc_url cannot be empty".to_string(),
            ));
        }

        if self.helius.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "helius.rpc_url cannot be empty".to_string(),
            ));
        }

        if self.jupiter.price_api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "jupiter.price_api_url cannot be empty".to_string(),
            ));
        }

        if self.jupiter.reference_mint.is_empty() {
            return Err(ConfigError::ValidationError(
                "jupiter.reference_mint cannot be empty".to_string(),
            ));
        }

        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "http.timeout_secs must be > 0 when set".to_string(),
            ));
        }

        if self.mint_age.page_size == 0 || self.mint_age.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "mint_age.page_size must be 1-{}, got {}",
                MAX_PAGE_SIZE, self.mint_age.page_size
            )));
        }

        if self.symbol.address.is_empty() {
            return Err(ConfigError::ValidationError(
                "symbol.address cannot be empty".to_string(),
            ));
        }

        validate_min_usd(self.holders.min_usd_value)?;

        if self.holders.output_dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "holders.output_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Threshold must be a finite, non-negative dollar amount
pub fn validate_min_usd(value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "min_usd_value must be a finite value >= 0, got {}",
            value
        )));
    }
    Ok(())
}
