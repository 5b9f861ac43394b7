use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::ports::{PricePort, SourceError};

pub const JUPITER_PRICE_API: &str = "https://lite-api.jup.ag/price/v3";
/// Wrapped SOL, sent alongside every lookup as the reference asset
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Price API returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<PriceError> for SourceError {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::HttpError(e) => SourceError::Transport(e.to_string()),
            PriceError::HttpStatus(status) => SourceError::Remote(format!("status {}", status)),
            PriceError::ParseError(msg) => SourceError::Parse(msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JupiterPriceClient {
    http: Client,
    api_url: String,
    reference_mint: String,
}

impl JupiterPriceClient {
    pub fn new() -> Result<Self, PriceError> {
        Self::with_options(JUPITER_PRICE_API, WSOL_MINT, None)
    }

    pub fn with_options(
        api_url: impl Into<String>,
        reference_mint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, PriceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            api_url: api_url.into(),
            reference_mint: reference_mint.into(),
        })
    }

    pub fn reference_mint(&self) -> &str {
        &self.reference_mint
    }

    /// USD price for `mint`, `None` when the API has no quote for it
    pub async fn get_price(&self, mint: &str) -> Result<Option<f64>, PriceError> {
        let ids = format!("{},{}", self.reference_mint, mint);

        let response = self
            .http
            .get(&self.api_url)
            .query(&[("ids", ids.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::HttpStatus(status));
        }

        let body: PriceResponse = response
            .json()
            .await
            .map_err(|e| PriceError::ParseError(e.to_string()))?;

        Ok(usd_price_of(&body, mint))
    }
}

#[async_trait]
impl PricePort for JupiterPriceClient {
    async fn usd_price(&self, mint: &str) -> Result<Option<f64>, SourceError> {
        Ok(self.get_price(mint).await?)
    }
}

/// Price v3 answers with a bare map of mint -> quote; unknown mints are absent
/// or null. Entries are decoded one at a time so a bad reference quote cannot
/// hide the target's price.
type PriceResponse = HashMap<String, Value>;

#[derive(Debug, Deserialize)]
struct PriceData {
    #[serde(rename = "usdPrice")]
    usd_price: f64,
    #[serde(rename = "blockId")]
    #[allow(dead_code)]
    block_id: Option<u64>,
    #[allow(dead_code)]
    decimals: Option<u8>,
    #[serde(rename = "priceChange24h")]
    #[allow(dead_code)]
    price_change_24h: Option<f64>,
}

fn usd_price_of(body: &PriceResponse, mint: &str) -> Option<f64> {
    let entry = body.get(mint).filter(|v| !v.is_null())?;
    match PriceData::deserialize(entry) {
        Ok(data) => Some(data.usd_price),
        Err(e) => {
            tracing::warn!(mint, error = %e, "Malformed price entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINT: &str = "5KCspct2KqKm58ZqVJExoihyT1cB8xXAFJt2xxbpump";

    #[test]
    fn test_client_creation() {
        let client = JupiterPriceClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().reference_mint(), WSOL_MINT);
    }

    #[test]
    fn test_parse_v3_response() {
        let body: PriceResponse = serde_json::from_str(&format!(
            r#"{{
                "{wsol}": {{"usdPrice": 187.12, "blockId": 348004023, "decimals": 9, "priceChange24h": -1.2}},
                "{mint}": {{"usdPrice": 0.000731, "blockId": 348004020, "decimals": 6, "priceChange24h": 12.5}}
            }}"#,
            wsol = WSOL_MINT,
            mint = MINT
        ))
        .unwrap();

        assert_eq!(usd_price_of(&body, MINT), Some(0.000731));
        assert_eq!(usd_price_of(&body, WSOL_MINT), Some(187.12));
    }

    #[test]
    fn test_missing_or_null_mint() {
        let body: PriceResponse = serde_json::from_str(&format!(
            r#"{{"{wsol}": {{"usdPrice": 187.12}}, "{mint}": null}}"#,
            wsol = WSOL_MINT,
            mint = MINT
        ))
        .unwrap();
        assert_eq!(usd_price_of(&body, MINT), None);
        assert_eq!(usd_price_of(&body, "Unknown111"), None);
    }

    #[test]
    fn test_malformed_reference_entry_does_not_hide_target() {
        let body: PriceResponse = serde_json::from_str(&format!(
            r#"{{"{wsol}": {{"blockId": 1}}, "{mint}": {{"usdPrice": 0.5}}}}"#,
            wsol = WSOL_MINT,
            mint = MINT
        ))
        .unwrap();
        assert_eq!(usd_price_of(&body, MINT), Some(0.5));
        assert_eq!(usd_price_of(&body, WSOL_MINT), None);
    }

    #[test]
    fn test_malformed_target_entry_is_no_price() {
        let body: PriceResponse = serde_json::from_str(&format!(
            r#"{{"{mint}": {{"usdPrice": "n/a"}}}}"#,
            mint = MINT
        ))
        .unwrap();
        assert_eq!(usd_price_of(&body, MINT), None);
    }

    #[test]
    fn test_error_into_source_error() {
        let err: SourceError = PriceError::HttpStatus(reqwest::StatusCode::TOO_MANY_REQUESTS).into();
        assert!(matches!(err, SourceError::Remote(ref m) if m.contains("429")));
    }
}
