//! Solana Provider Module
//!
//! Thin abstraction over the non-blocking Solana RPC client covering the
//! two operations the swap pipeline needs: fetching the latest finalized
//! blockhash and broadcasting a signed transaction. A single attempt is
//! made per call; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, signature::Signature,
    transaction::Transaction,
};
use thiserror::Error;

use crate::constants::DEFAULT_RPC_TIMEOUT_SECONDS;

/// Errors returned by the Solana provider.
#[derive(Error, Debug)]
pub enum SolanaProviderError {
    /// Network/IO error (connection issues, timeouts)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Error reported by the RPC endpoint (simulation failures, invalid
    /// transactions, node-side errors)
    #[error("RPC error: {0}")]
    RpcError(String),
}

impl SolanaProviderError {
    /// Classifies a Solana RPC client error into a provider error variant.
    pub fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
                SolanaProviderError::NetworkError(error.to_string())
            }
            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }

    /// Human-readable cause of this error, produced by the substring
    /// classifier over the underlying message.
    pub fn description(&self) -> String {
        match self {
            SolanaProviderError::NetworkError(raw) | SolanaProviderError::RpcError(raw) => {
                classify_rpc_error(raw)
            }
        }
    }
}

/// Maps known RPC failure messages to human-readable causes.
///
/// Matching is case-sensitive substring containment; the first match wins.
/// Unrecognized messages pass through prefixed as unknown. Pure function of
/// its input.
pub fn classify_rpc_error(raw: &str) -> String {
    if raw.contains("custom program error") && raw.contains("0x1") {
        return "Custom program error: Insufficient funds or transaction fee issue.".to_string();
    }
    if raw.contains("Transaction simulation failed") {
        return "Transaction simulation failed due to insufficient funds or invalid transaction."
            .to_string();
    }
    if raw.contains("Transaction signature verification failure") {
        return "Transaction signature verification failure. Check your private key.".to_string();
    }
    format!("An unknown RPC error occurred: {raw}")
}

/// A trait that abstracts the Solana provider operations used by the swap
/// pipeline.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaProviderTrait: Send + Sync {
    /// Retrieves the latest blockhash at the provider's commitment level.
    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError>;

    /// Sends a signed transaction to the network.
    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: RpcClient,
}

impl std::fmt::Debug for SolanaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaProvider").finish_non_exhaustive()
    }
}

impl SolanaProvider {
    /// Creates a provider for the given RPC URL with finalized commitment
    /// and the default request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: RpcClient::new_with_timeout_and_commitment(
                url.into(),
                Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECONDS),
                CommitmentConfig::finalized(),
            ),
        }
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError> {
        self.client
            .send_transaction(transaction)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }
}
