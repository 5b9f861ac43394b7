use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_client::{GetConfirmedSignaturesForAddress2Config, RpcClient};
use solana_client::rpc_request::RpcError;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::ports::{SignatureHistoryPort, SignatureRecord, SourceError};

/// RPC error codes meaning "this node has no time for that slot"
const BLOCK_NOT_AVAILABLE: i64 = -32004;
const SLOT_SKIPPED: i64 = -32007;
const LONG_TERM_STORAGE_SLOT_SKIPPED: i64 = -32009;

#[derive(Debug, Error)]
pub enum SolanaClientError {
    #[error("RPC request failed: {0}")]
    RpcError(String),
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}

impl From<SolanaClientError> for SourceError {
    fn from(err: SolanaClientError) -> Self {
        match err {
            SolanaClientError::RpcError(msg) => SourceError::Transport(msg),
            SolanaClientError::InvalidSignature(msg) | SolanaClientError::InvalidPublicKey(msg) => {
                SourceError::InvalidInput(msg)
            }
        }
    }
}

/// Wrapper around Solana RPC client with async-compatible methods
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
}

impl SolanaClient {
    /// Create a new Solana RPC client
    pub fn new(rpc_url: String) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()));
        Self { client }
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(rpc_url: String, timeout: Duration) -> Self {
        let client = Arc::new(RpcClient::new_with_timeout_and_commitment(
            rpc_url,
            timeout,
            CommitmentConfig::confirmed(),
        ));
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Page of signatures for `address`, newest first, older than `before`
    pub async fn get_signatures_before(
        &self,
        address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, SolanaClientError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|e| SolanaClientError::InvalidPublicKey(e.to_string()))?;
        let before = before
            .map(Signature::from_str)
            .transpose()
            .map_err(|e| SolanaClientError::InvalidSignature(e.to_string()))?;

        let config = GetConfirmedSignaturesForAddress2Config {
            before,
            until: None,
            limit: Some(limit),
            commitment: Some(CommitmentConfig::confirmed()),
        };

        // Spawn blocking to make sync RPC call async-compatible
        let client = Arc::clone(&self.client);
        let statuses = tokio::task::spawn_blocking(move || {
            client
                .get_signatures_for_address_with_config(&pubkey, config)
                .map_err(|e| SolanaClientError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))??;

        Ok(statuses
            .into_iter()
            .map(|s| SignatureRecord::new(s.signature, s.slot, s.block_time))
            .collect())
    }

    /// Block time for a slot, `None` when the node cannot provide one
    pub async fn get_block_time(&self, slot: u64) -> Result<Option<i64>, SolanaClientError> {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || match client.get_block_time(slot) {
            Ok(ts) => Ok(Some(ts)),
            Err(e) if is_block_time_unavailable(&e) => {
                tracing::debug!(slot, error = %e, "Node has no block time for slot");
                Ok(None)
            }
            Err(e) => Err(SolanaClientError::RpcError(e.to_string())),
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }
}

fn is_block_time_unavailable(err: &ClientError) -> bool {
    matches!(
        err.kind(),
        ClientErrorKind::RpcError(RpcError::RpcResponseError { code, .. })
            if is_block_time_unavailable_code(*code)
    )
}

fn is_block_time_unavailable_code(code: i64) -> bool {
    matches!(code, BLOCK_NOT_AVAILABLE | SLOT_SKIPPED | LONG_TERM_STORAGE_SLOT_SKIPPED)
}

#[async_trait]
impl SignatureHistoryPort for SolanaClient {
    async fn signatures_before(
        &self,
        address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, SourceError> {
        Ok(self.get_signatures_before(address, before, limit).await?)
    }

    async fn block_time(&self, slot: u64) -> Result<Option<i64>, SourceError> {
        Ok(self.get_block_time(slot).await?)
    }
}
