//! Helius RPC Client
//!
//! JSON-RPC over HTTP against the Helius mainnet endpoint. Serves the DAS
//! `getAsset` lookup and the filtered `getProgramAccounts` token account
//! scan. Requests are sent once; there is no retry loop.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use spl_token::solana_program::program_pack::Pack;
use thiserror::Error;

use super::types::{parse_token_accounts, Asset, RpcResponse};
use crate::ports::{
    AssetMetadataPort, AssetSymbols, SourceError, TokenAccountPort, TokenAccountRecord,
};

pub const DEFAULT_HELIUS_RPC_URL: &str = "https://mainnet.helius-rpc.com";

/// Errors that can occur when talking to Helius
#[derive(Debug, Error)]
pub enum HeliusError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("No result in response")]
    MissingResult,

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Helius API key is not configured")]
    MissingApiKey,
}

impl From<HeliusError> for SourceError {
    fn from(err: HeliusError) -> Self {
        match err {
            HeliusError::HttpError(e) => SourceError::Transport(e.to_string()),
            HeliusError::ParseError(msg) => SourceError::Parse(msg),
            missing @ HeliusError::MissingApiKey => SourceError::InvalidInput(missing.to_string()),
            other => SourceError::Remote(other.to_string()),
        }
    }
}

/// Configuration for the HeliusClient
#[derive(Debug, Clone)]
pub struct HeliusConfig {
    /// Helius RPC endpoint, without the api-key query
    pub rpc_url: String,
    /// Helius API key
    pub api_key: String,
    /// Request timeout, `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl HeliusConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            rpc_url: DEFAULT_HELIUS_RPC_URL.to_string(),
            api_key: api_key.into(),
            timeout: None,
        }
    }
}

/// Client for the Helius enriched RPC
#[derive(Debug, Clone)]
pub struct HeliusClient {
    config: HeliusConfig,
    http: Client,
}

impl HeliusClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, HeliusError> {
        Self::with_config(HeliusConfig::new(api_key))
    }

    pub fn with_config(config: HeliusConfig) -> Result<Self, HeliusError> {
        if config.api_key.trim().is_empty() {
            return Err(HeliusError::MissingApiKey);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }

    /// DAS `getAsset` for a mint or asset id
    pub async fn get_asset(&self, address: &str) -> Result<Asset, HeliusError> {
        self.call(&asset_request(address)).await
    }

    /// Every SPL token account of `mint`, parsed down to owner and UI amount.
    ///
    /// One unbounded `getProgramAccounts` call; large holder sets arrive in a
    /// single response.
    pub async fn get_token_accounts(&self, mint: &str) -> Result<Vec<TokenAccountRecord>, HeliusError> {
        let entries: Vec<Value> = self.call(&token_accounts_request(mint)).await?;
        tracing::debug!(mint, entries = entries.len(), "getProgramAccounts returned");
        Ok(parse_token_accounts(entries))
    }

    async fn call<T: DeserializeOwned>(&self, body: &Value) -> Result<T, HeliusError> {
        tracing::debug!(method = %body["method"], "Helius request");

        let response = self
            .http
            .post(&self.config.rpc_url)
            .query(&[("api-key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HeliusError::HttpStatus(status));
        }

        let envelope: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| HeliusError::ParseError(e.to_string()))?;

        if let Some(err) = envelope.error {
            return Err(HeliusError::RpcError {
                code: err.code,
                message: err.message,
            });
        }
        envelope.result.ok_or(HeliusError::MissingResult)
    }
}

/// `getAsset` body, with inscription data requested
pub fn asset_request(address: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": address,
        "method": "getAsset",
        "params": {
            "id": address,
            "displayOptions": {
                "showInscription": true
            }
        }
    })
}

/// `getProgramAccounts` body matching token accounts whose mint is `mint`
pub fn token_accounts_request(mint: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": "1",
        "method": "getProgramAccounts",
        "params": [
            spl_token::id().to_string(),
            {
                "encoding": "jsonParsed",
                "filters": [
                    { "dataSize": spl_token::state::Account::LEN },
                    { "memcmp": { "offset": 0, "bytes": mint } }
                ]
            }
        ]
    })
}

#[async_trait]
impl AssetMetadataPort for HeliusClient {
    async fn asset_symbols(&self, address: &str) -> Result<AssetSymbols, SourceError> {
        Ok(self.get_asset(address).await?.into())
    }
}

#[async_trait]
impl TokenAccountPort for HeliusClient {
    async fn token_accounts(&self, mint: &str) -> Result<Vec<TokenAccountRecord>, SourceError> {
        Ok(self.get_token_accounts(mint).await?)
    }
}
