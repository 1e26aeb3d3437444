//! Client seams for the transaction workflow.
//!
//! The workflow talks to the chain through two narrow interfaces: a
//! [`ReadClient`] for state queries and dry-runs, and a [`WalletClient`]
//! for signing and broadcasting. Concrete implementations backed by the
//! Alloy library live in [`implementations`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use txflow_types::{Address, Bytes, Transaction, TransactionHash, TransactionReceipt};

pub mod implementations;

pub use implementations::alloy::{AlloyReadClient, AlloyWalletClient};

/// Errors surfaced by client implementations.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Invalid endpoint: {0}")]
	InvalidEndpoint(String),
	#[error("Network error: {0}")]
	Network(String),
	/// The dry-run reverted; `data` carries the raw revert bytes for decoding.
	#[error("Execution reverted")]
	Reverted { data: Bytes },
	#[error("Transaction rejected: {0}")]
	Rejected(String),
	#[error("Timed out after {elapsed_secs}s waiting for {confirmations} confirmations")]
	ConfirmationTimeout {
		confirmations: u64,
		elapsed_secs: u64,
	},
}

/// How long to wait for a transaction to be considered confirmed.
///
/// The overall timeout budget scales with the requested confirmation depth
/// and is capped at `max_wait_secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPolicy {
	/// Number of block confirmations required before a transaction is final.
	pub confirmations: u64,
	/// Interval between receipt polls.
	pub poll_interval_secs: u64,
	/// Time budget granted per requested confirmation.
	pub seconds_per_confirmation: u64,
	/// Upper bound on the total wait.
	pub max_wait_secs: u64,
}

impl Default for ConfirmationPolicy {
	fn default() -> Self {
		Self {
			confirmations: 1,
			poll_interval_secs: 10,
			seconds_per_confirmation: 20,
			max_wait_secs: 3600,
		}
	}
}

impl ConfirmationPolicy {
	fn timeout_secs(&self) -> u64 {
		(self.confirmations * self.seconds_per_confirmation)
			.max(self.seconds_per_confirmation)
			.min(self.max_wait_secs)
	}
}

/// Read-side chain access: dry-runs, fee estimation and receipt queries.
#[async_trait]
pub trait ReadClient: Send + Sync {
	/// The chain this client is connected to.
	fn chain_id(&self) -> u64;

	/// Executes the transaction against current chain state without
	/// submitting it. A revert is reported as [`ClientError::Reverted`]
	/// with the raw revert data attached.
	async fn call(&self, tx: &Transaction) -> Result<Bytes, ClientError>;

	/// Fills in nonce, gas limit and fee fields that the caller left
	/// unset. Gas estimation doubles as a dry-run: a reverting
	/// transaction fails here with [`ClientError::Reverted`].
	async fn prepare(&self, tx: Transaction) -> Result<Transaction, ClientError>;

	/// Fetches the receipt for a transaction, if it has been mined.
	async fn receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, ClientError>;

	/// The current block height.
	async fn block_number(&self) -> Result<u64, ClientError>;

	/// Polls until the transaction has the confirmation depth required by
	/// the policy, or the policy's timeout budget is exhausted.
	async fn wait_for_receipt(
		&self,
		hash: &TransactionHash,
		policy: &ConfirmationPolicy,
	) -> Result<TransactionReceipt, ClientError> {
		let poll_interval = tokio::time::Duration::from_secs(policy.poll_interval_secs);
		let timeout_secs = policy.timeout_secs();
		let max_wait_time = tokio::time::Duration::from_secs(timeout_secs);
		let start_time = tokio::time::Instant::now();

		tracing::info!(
			tx_hash = %truncate_hash(hash),
			"Waiting for {} confirmations (timeout: {}s)",
			policy.confirmations,
			timeout_secs
		);

		loop {
			if start_time.elapsed() > max_wait_time {
				return Err(ClientError::ConfirmationTimeout {
					confirmations: policy.confirmations,
					elapsed_secs: max_wait_time.as_secs(),
				});
			}

			// Transaction not yet mined, wait and retry
			let receipt = match self.receipt(hash).await? {
				Some(receipt) => receipt,
				None => {
					tokio::time::sleep(poll_interval).await;
					continue;
				}
			};

			let current_block = self.block_number().await?;
			let current_confirmations = current_block.saturating_sub(receipt.block_number);

			if current_confirmations >= policy.confirmations {
				return Ok(receipt);
			}

			tracing::debug!(
				"Waiting for {} more confirmations...",
				policy.confirmations.saturating_sub(current_confirmations)
			);

			tokio::time::sleep(poll_interval).await;
		}
	}
}

/// Write-side chain access: the signing wallet.
#[async_trait]
pub trait WalletClient: Send + Sync {
	/// The address transactions are sent from.
	fn address(&self) -> Address;

	/// The chain this wallet signs for.
	fn chain_id(&self) -> u64;

	/// Signs and broadcasts the transaction, returning its hash.
	async fn send_transaction(&self, tx: Transaction) -> Result<TransactionHash, ClientError>;
}

/// Utility function to truncate a transaction hash for display.
pub fn truncate_hash(hash: &TransactionHash) -> String {
	let hash_str = hex::encode(hash.as_slice());
	if hash_str.len() <= 8 {
		hash_str
	} else {
		format!("{}..", &hash_str[..8])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU64, Ordering};
	use txflow_types::U256;

	struct FakeReadClient {
		receipt_at_block: Option<u64>,
		/// Block height returned by consecutive `block_number` calls.
		head: AtomicU64,
	}

	#[async_trait]
	impl ReadClient for FakeReadClient {
		fn chain_id(&self) -> u64 {
			31337
		}

		async fn call(&self, _tx: &Transaction) -> Result<Bytes, ClientError> {
			Ok(Bytes::new())
		}

		async fn prepare(&self, tx: Transaction) -> Result<Transaction, ClientError> {
			Ok(tx)
		}

		async fn receipt(
			&self,
			hash: &TransactionHash,
		) -> Result<Option<TransactionReceipt>, ClientError> {
			Ok(self.receipt_at_block.map(|block_number| TransactionReceipt {
				hash: *hash,
				block_number,
				success: true,
			}))
		}

		async fn block_number(&self) -> Result<u64, ClientError> {
			Ok(self.head.fetch_add(1, Ordering::SeqCst))
		}
	}

	#[test]
	fn test_truncate_hash() {
		let hash = TransactionHash::from(U256::from(0xabcdefu64).to_be_bytes::<32>());
		let truncated = truncate_hash(&hash);
		assert_eq!(truncated, "00000000..");
	}

	#[test]
	fn test_confirmation_policy_timeout_budget() {
		let policy = ConfirmationPolicy::default();
		assert_eq!(policy.timeout_secs(), 20);

		let deep = ConfirmationPolicy {
			confirmations: 12,
			..ConfirmationPolicy::default()
		};
		assert_eq!(deep.timeout_secs(), 240);

		let capped = ConfirmationPolicy {
			confirmations: 1000,
			..ConfirmationPolicy::default()
		};
		assert_eq!(capped.timeout_secs(), 3600);
	}

	#[tokio::test(start_paused = true)]
	async fn test_wait_for_receipt_reaches_confirmation_depth() {
		let client = FakeReadClient {
			receipt_at_block: Some(100),
			// First poll sees the inclusion block, later polls see new blocks.
			head: AtomicU64::new(100),
		};
		let policy = ConfirmationPolicy {
			confirmations: 2,
			..ConfirmationPolicy::default()
		};

		let hash = TransactionHash::from([0x22u8; 32]);
		let receipt = client.wait_for_receipt(&hash, &policy).await.unwrap();
		assert_eq!(receipt.block_number, 100);
		assert!(receipt.success);
	}

	#[tokio::test(start_paused = true)]
	async fn test_wait_for_receipt_times_out_when_never_mined() {
		let client = FakeReadClient {
			receipt_at_block: None,
			head: AtomicU64::new(0),
		};
		let policy = ConfirmationPolicy::default();

		let hash = TransactionHash::from([0x33u8; 32]);
		let result = client.wait_for_receipt(&hash, &policy).await;
		match result {
			Err(ClientError::ConfirmationTimeout { elapsed_secs, .. }) => {
				assert_eq!(elapsed_secs, 20);
			}
			other => panic!("expected timeout, got {:?}", other),
		}
	}
}
