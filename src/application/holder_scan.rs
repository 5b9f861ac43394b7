//! Holder Scanner
//!
//! Prices a token, scans every token account of its mint and builds the
//! USD-filtered holder report.
//!
//! The account scan is a single unbounded `getProgramAccounts` call. Mints
//! with very large holder sets come back in one response; nothing here
//! batches or pages it.

use crate::domain::{value_holders, HolderReport};
use crate::ports::{PricePort, SourceError, TokenAccountPort};

/// Outcome of a holder scan
#[derive(Debug, Clone, PartialEq)]
pub enum HolderScan {
    /// No usable price; the account scan was skipped
    NoPrice,
    /// Scan completed (possibly with zero holders)
    Scanned { price: f64, report: HolderReport },
}

impl HolderScan {
    /// Holders above the threshold, empty when no price was found
    pub fn holders(&self) -> &[crate::domain::Holder] {
        match self {
            HolderScan::NoPrice => &[],
            HolderScan::Scanned { report, .. } => &report.holders,
        }
    }
}

pub struct HolderScanner<P, T> {
    prices: P,
    accounts: T,
}

impl<P: PricePort, T: TokenAccountPort> HolderScanner<P, T> {
    pub fn new(prices: P, accounts: T) -> Self {
        Self { prices, accounts }
    }

    /// Scan holders of `mint` worth at least `min_usd_value`.
    ///
    /// A failed or missing price ends the scan with `HolderScan::NoPrice`.
    /// A failed account scan is returned as an error.
    pub async fn scan(&self, mint: &str, min_usd_value: f64) -> Result<HolderScan, SourceError> {
        match self.price(mint).await {
            Some(price) => {
                let report = self.scan_at_price(mint, price, min_usd_value).await?;
                Ok(HolderScan::Scanned { price, report })
            }
            None => Ok(HolderScan::NoPrice),
        }
    }

    /// Usable USD price of `mint`. Lookup failures, missing quotes and
    /// negative or non-finite prices all come back as `None`.
    pub async fn price(&self, mint: &str) -> Option<f64> {
        match self.prices.usd_price(mint).await {
            Ok(Some(price)) if price.is_finite() && price >= 0.0 => {
                tracing::info!(mint, price, "Token price resolved");
                Some(price)
            }
            Ok(Some(price)) => {
                tracing::warn!(mint, price, "Ignoring unusable price");
                None
            }
            Ok(None) => {
                tracing::warn!(mint, "No price quote for token");
                None
            }
            Err(e) => {
                tracing::warn!(mint, error = %e, "Price lookup failed");
                None
            }
        }
    }

    /// Account scan and valuation at an already resolved price
    pub async fn scan_at_price(
        &self,
        mint: &str,
        price: f64,
        min_usd_value: f64,
    ) -> Result<HolderReport, SourceError> {
        let accounts = self.accounts.token_accounts(mint).await?;
        tracing::info!(mint, accounts = accounts.len(), "Token accounts fetched");

        let holders = value_holders(&accounts, price, min_usd_value);
        Ok(HolderReport::new(mint, min_usd_value, holders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{MockPrices, MockTokenAccounts};
    use crate::ports::TokenAccountRecord;

    const MINT: &str = "5KCspct2KqKm58ZqVJExoihyT1cB8xXAFJt2xxbpump";

    fn sample_accounts() -> Vec<TokenAccountRecord> {
        vec![
            TokenAccountRecord::new("A", 20.0),
            TokenAccountRecord::new("B", 10.0),
            TokenAccountRecord::new("C", 16.0),
            TokenAccountRecord::new("D", 16.02),
        ]
    }

    #[tokio::test]
    async fn test_scan_filters_and_sorts() {
        let scanner = HolderScanner::new(
            MockPrices::new().with_price(MINT, 0.5),
            MockTokenAccounts::new(sample_accounts()),
        );

        let scan = scanner.scan(MINT, 8.0).await.unwrap();
        let owners: Vec<&str> = scan.holders().iter().map(|h| h.owner.as_str()).collect();
        assert_eq!(owners, vec!["A", "D", "C"]);

        match scan {
            HolderScan::Scanned { price, report } => {
                assert_eq!(price, 0.5);
                assert_eq!(report.total_holders, 3);
                assert_eq!(report.min_usd_value, 8.0);
                assert_eq!(report.token_address, MINT);
            }
            HolderScan::NoPrice => panic!("expected a completed scan"),
        }
    }

    #[tokio::test]
    async fn test_missing_price_skips_account_scan() {
        let scanner = HolderScanner::new(MockPrices::new(), MockTokenAccounts::new(sample_accounts()));

        let scan = scanner.scan(MINT, 8.0).await.unwrap();
        assert_eq!(scan, HolderScan::NoPrice);
        assert!(scan.holders().is_empty());
        assert_eq!(scanner.accounts.call_count(), 0);
    }

    #[tokio::test]
    async fn test_price_error_is_no_price() {
        let scanner = HolderScanner::new(
            MockPrices::failing(SourceError::Transport("dns".to_string())),
            MockTokenAccounts::new(sample_accounts()),
        );
        assert_eq!(scanner.scan(MINT, 8.0).await.unwrap(), HolderScan::NoPrice);
    }

    #[tokio::test]
    async fn test_nan_price_is_no_price() {
        let scanner = HolderScanner::new(
            MockPrices::new().with_price(MINT, f64::NAN),
            MockTokenAccounts::new(sample_accounts()),
        );
        assert_eq!(scanner.scan(MINT, 8.0).await.unwrap(), HolderScan::NoPrice);
    }

    #[tokio::test]
    async fn test_zero_accounts_is_empty_report() {
        let scanner = HolderScanner::new(
            MockPrices::new().with_price(MINT, 2.0),
            MockTokenAccounts::new(Vec::new()),
        );

        match scanner.scan(MINT, 8.0).await.unwrap() {
            HolderScan::Scanned { report, .. } => {
                assert_eq!(report.total_holders, 0);
                assert!(report.holders.is_empty());
            }
            HolderScan::NoPrice => panic!("expected a completed scan"),
        }
    }

    #[tokio::test]
    async fn test_price_resolved_before_any_account_scan() {
        let scanner = HolderScanner::new(
            MockPrices::new().with_price(MINT, 0.5),
            MockTokenAccounts::new(sample_accounts()),
        );

        assert_eq!(scanner.price(MINT).await, Some(0.5));
        assert_eq!(scanner.accounts.call_count(), 0);

        let report = scanner.scan_at_price(MINT, 0.5, 8.0).await.unwrap();
        assert_eq!(scanner.accounts.call_count(), 1);
        assert_eq!(report.total_holders, 3);
    }

    #[tokio::test]
    async fn test_negative_price_is_unusable() {
        let scanner = HolderScanner::new(
            MockPrices::new().with_price(MINT, -1.0),
            MockTokenAccounts::new(sample_accounts()),
        );
        assert_eq!(scanner.price(MINT).await, None);
    }

    #[tokio::test]
    async fn test_account_scan_error_propagates() {
        let scanner = HolderScanner::new(
            MockPrices::new().with_price(MINT, 2.0),
            MockTokenAccounts::failing(SourceError::Remote("429".to_string())),
        );
        assert!(matches!(scanner.scan(MINT, 8.0).await, Err(SourceError::Remote(_))));
    }
}
