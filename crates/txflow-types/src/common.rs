//! Common types used throughout the transaction workflow.

use serde::{Deserialize, Serialize};

// Re-export commonly used ethereum types
pub use alloy_primitives::{Address, Bytes, B256, U256};

/// Transaction hash
pub type TransactionHash = B256;

/// Block number
pub type BlockNumber = u64;

/// Transaction receipt containing execution details.
///
/// Provides information about a transaction after it has been included in a block,
/// including its success status and block number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: BlockNumber,
	/// Whether the transaction executed successfully.
	pub success: bool,
}
