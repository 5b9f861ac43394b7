//! Mint Age Finder
//!
//! Walks `getSignaturesForAddress` backwards until history runs out, then
//! resolves the block time of the oldest transaction.

use crate::domain::{timestamp_to_utc, MintAge};
use crate::ports::{SignatureHistoryPort, SignatureRecord, SourceError};

/// Largest page `getSignaturesForAddress` will serve
pub const MAX_PAGE_SIZE: usize = 1000;

pub struct MintAgeFinder<S> {
    history: S,
    page_size: usize,
}

impl<S: SignatureHistoryPort> MintAgeFinder<S> {
    pub fn new(history: S) -> Self {
        Self {
            history,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Override the page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Oldest signature recorded for `address`, `None` if it has no history.
    ///
    /// Pages are newest-to-oldest, so the last entry of each page becomes the
    /// cursor for the next request. An empty or short page ends the walk.
    pub async fn find_oldest(&self, address: &str) -> Result<Option<SignatureRecord>, SourceError> {
        let mut oldest: Option<SignatureRecord> = None;
        let mut pages = 0u32;

        loop {
            let before = oldest.as_ref().map(|r| r.signature.as_str());
            let page = self
                .history
                .signatures_before(address, before, self.page_size)
                .await?;
            pages += 1;

            let page_len = page.len();
            tracing::debug!(page = pages, entries = page_len, "Fetched signature page");

            match page.into_iter().last() {
                Some(last) => oldest = Some(last),
                None => break,
            }

            if page_len < self.page_size {
                break;
            }
        }

        tracing::info!(address, pages, found = oldest.is_some(), "Signature history walked");
        Ok(oldest)
    }

    /// Locate the oldest transaction and its block time.
    ///
    /// History errors propagate. A failed `getBlockTime` fallback only makes
    /// the timestamp unavailable.
    pub async fn resolve(&self, address: &str) -> Result<MintAge, SourceError> {
        let Some(oldest) = self.find_oldest(address).await? else {
            return Ok(MintAge::NotFound);
        };

        let block_time = match oldest.block_time {
            Some(ts) => Some(ts),
            None => {
                tracing::info!(slot = oldest.slot, "Oldest signature has no block time, asking getBlockTime");
                match self.history.block_time(oldest.slot).await {
                    Ok(ts) => ts,
                    Err(e) => {
                        tracing::warn!(slot = oldest.slot, error = %e, "Block time lookup failed");
                        None
                    }
                }
            }
        };

        Ok(MintAge::Found {
            signature: oldest.signature,
            slot: oldest.slot,
            minted_at: block_time.and_then(timestamp_to_utc),
        })
    }
}
