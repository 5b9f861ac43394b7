use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use super::{
    AssetMetadataPort, AssetSymbols, PricePort, SignatureHistoryPort, SignatureRecord,
    SourceError, TokenAccountPort, TokenAccountRecord,
};

/// Signature history fake that serves queued pages and records every call
#[derive(Debug, Default)]
pub struct MockSignatureHistory {
    pages: Arc<Mutex<VecDeque<Result<Vec<SignatureRecord>, SourceError>>>>,
    block_times: Arc<Mutex<HashMap<u64, Result<Option<i64>, SourceError>>>>,
    calls: Arc<Mutex<Vec<(Option<String>, usize)>>>,
    block_time_calls: Arc<Mutex<Vec<u64>>>,
}

impl MockSignatureHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue the next page
    pub fn with_page(self, page: Vec<SignatureRecord>) -> Self {
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    /// Builder method to queue a failing page request
    pub fn with_page_error(self, err: SourceError) -> Self {
        self.pages.lock().unwrap().push_back(Err(err));
        self
    }

    /// Builder method to set the block time answer for a slot
    pub fn with_block_time(self, slot: u64, answer: Result<Option<i64>, SourceError>) -> Self {
        self.block_times.lock().unwrap().insert(slot, answer);
        self
    }

    /// `(before, limit)` of every page request, in order
    pub fn get_calls(&self) -> Vec<(Option<String>, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_block_time_calls(&self) -> Vec<u64> {
        self.block_time_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignatureHistoryPort for MockSignatureHistory {
    async fn signatures_before(
        &self,
        _address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((before.map(str::to_string), limit));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn block_time(&self, slot: u64) -> Result<Option<i64>, SourceError> {
        self.block_time_calls.lock().unwrap().push(slot);
        self.block_times
            .lock()
            .unwrap()
            .get(&slot)
            .cloned()
            .unwrap_or(Ok(None))
    }
}

/// Asset metadata fake with a single canned answer
#[derive(Debug)]
pub struct MockAssetMetadata {
    answer: Result<AssetSymbols, SourceError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAssetMetadata {
    pub fn new(answer: Result<AssetSymbols, SourceError>) -> Self {
        Self {
            answer,
            calls: Arc::default(),
        }
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetMetadataPort for MockAssetMetadata {
    async fn asset_symbols(&self, address: &str) -> Result<AssetSymbols, SourceError> {
        self.calls.lock().unwrap().push(address.to_string());
        self.answer.clone()
    }
}

/// Price feed fake keyed by mint
#[derive(Debug, Default)]
pub struct MockPrices {
    prices: HashMap<String, f64>,
    failure: Option<SourceError>,
}

impl MockPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, mint: &str, price: f64) -> Self {
        self.prices.insert(mint.to_string(), price);
        self
    }

    pub fn failing(err: SourceError) -> Self {
        Self {
            prices: HashMap::new(),
            failure: Some(err),
        }
    }
}

#[async_trait]
impl PricePort for MockPrices {
    async fn usd_price(&self, mint: &str) -> Result<Option<f64>, SourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.prices.get(mint).copied())
    }
}

/// Token account scan fake
#[derive(Debug)]
pub struct MockTokenAccounts {
    answer: Result<Vec<TokenAccountRecord>, SourceError>,
    calls: Arc<Mutex<u32>>,
}

impl MockTokenAccounts {
    pub fn new(accounts: Vec<TokenAccountRecord>) -> Self {
        Self {
            answer: Ok(accounts),
            calls: Arc::default(),
        }
    }

    pub fn failing(err: SourceError) -> Self {
        Self {
            answer: Err(err),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TokenAccountPort for MockTokenAccounts {
    async fn token_accounts(&self, _mint: &str) -> Result<Vec<TokenAccountRecord>, SourceError> {
        *self.calls.lock().unwrap() += 1;
        self.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_history_records_calls() {
        let mock = MockSignatureHistory::new()
            .with_page(vec![SignatureRecord::new("a", 1, None)]);

        let page = mock.signatures_before("addr", Some("z"), 5).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(mock.get_calls(), vec![(Some("z".to_string()), 5)]);

        // Queue exhausted: behaves like end of history
        let page = mock.signatures_before("addr", Some("a"), 5).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_mock_prices() {
        let mock = MockPrices::new().with_price("MINT", 0.5);
        assert_eq!(mock.usd_price("MINT").await, Ok(Some(0.5)));
        assert_eq!(mock.usd_price("OTHER").await, Ok(None));
    }
}
