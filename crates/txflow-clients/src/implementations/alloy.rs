//! Alloy-backed client implementations.
//!
//! These implementations use the Alloy library to talk to EVM-compatible
//! chains over HTTP JSON-RPC. The read client wraps a plain provider; the
//! wallet client wraps a provider with a local signer attached so that
//! submission signs transactions transparently.

use crate::{truncate_hash, ClientError, ReadClient, WalletClient};
use alloy_network::EthereumWallet;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::TransportError;
use alloy_transport_http::Http;
use async_trait::async_trait;
use std::sync::Arc;
use txflow_types::{Address, Bytes, Transaction, TransactionHash, TransactionReceipt};

type HttpProvider = Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>;

/// Maps a provider error to a client error, surfacing revert data when the
/// node attached any to the error response.
fn map_call_error(err: TransportError) -> ClientError {
	if let Some(data) = err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
		return ClientError::Reverted { data };
	}
	ClientError::Network(format!("RPC call failed: {}", err))
}

/// Read-only HTTP client for state queries and dry-runs.
pub struct AlloyReadClient {
	provider: HttpProvider,
	chain_id: u64,
}

impl AlloyReadClient {
	/// Connects a read client to the given HTTP RPC endpoint.
	pub fn new(rpc_url: &str, chain_id: u64) -> Result<Self, ClientError> {
		let url = rpc_url
			.parse()
			.map_err(|e| ClientError::InvalidEndpoint(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().on_http(url);

		Ok(Self {
			provider: Arc::new(provider),
			chain_id,
		})
	}
}

#[async_trait]
impl ReadClient for AlloyReadClient {
	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	async fn call(&self, tx: &Transaction) -> Result<Bytes, ClientError> {
		let request: TransactionRequest = tx.clone().into();
		self.provider.call(&request).await.map_err(map_call_error)
	}

	async fn prepare(&self, mut tx: Transaction) -> Result<Transaction, ClientError> {
		let request: TransactionRequest = tx.clone().into();

		if tx.nonce.is_none() {
			if let Some(from) = tx.from {
				let nonce = self
					.provider
					.get_transaction_count(from)
					.await
					.map_err(|e| ClientError::Network(format!("Failed to get nonce: {}", e)))?;
				tx.nonce = Some(nonce);
			}
		}

		if tx.gas_limit.is_none() {
			// Estimation executes the call, so a reverting transaction
			// surfaces its revert data here.
			let gas = self
				.provider
				.estimate_gas(&request)
				.await
				.map_err(map_call_error)?;
			tx.gas_limit = Some(gas);
		}

		if tx.gas_price.is_none() && tx.max_fee_per_gas.is_none() {
			let fees = self
				.provider
				.estimate_eip1559_fees(None)
				.await
				.map_err(|e| ClientError::Network(format!("Failed to estimate fees: {}", e)))?;
			tx.max_fee_per_gas = Some(fees.max_fee_per_gas);
			tx.max_priority_fee_per_gas = Some(fees.max_priority_fee_per_gas);
		}

		Ok(tx)
	}

	async fn receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, ClientError> {
		let receipt = self
			.provider
			.get_transaction_receipt(*hash)
			.await
			.map_err(|e| ClientError::Network(format!("Failed to get receipt: {}", e)))?;

		Ok(receipt.map(|receipt| TransactionReceipt {
			hash: receipt.transaction_hash,
			block_number: receipt.block_number.unwrap_or(0),
			success: receipt.status(),
		}))
	}

	async fn block_number(&self) -> Result<u64, ClientError> {
		self.provider
			.get_block_number()
			.await
			.map_err(|e| ClientError::Network(format!("Failed to get block number: {}", e)))
	}
}

/// Wallet-backed HTTP client for signing and broadcasting.
pub struct AlloyWalletClient {
	provider: HttpProvider,
	address: Address,
	chain_id: u64,
}

impl AlloyWalletClient {
	/// Connects a wallet client with the given signer.
	///
	/// The signer is pinned to the chain id; the provider's fillers take
	/// care of nonce, gas and fee fields left unset at submission.
	pub fn new(
		rpc_url: &str,
		chain_id: u64,
		mut signer: PrivateKeySigner,
	) -> Result<Self, ClientError> {
		let url = rpc_url
			.parse()
			.map_err(|e| ClientError::InvalidEndpoint(format!("Invalid RPC URL: {}", e)))?;

		signer = signer.with_chain_id(Some(chain_id));
		let address = signer.address();
		let wallet = EthereumWallet::from(signer);

		let provider = ProviderBuilder::new()
			.with_recommended_fillers()
			.wallet(wallet)
			.on_http(url);

		Ok(Self {
			provider: Arc::new(provider),
			address,
			chain_id,
		})
	}

	/// Convenience constructor from a hex-encoded private key
	/// (with or without 0x prefix).
	pub fn from_private_key(
		rpc_url: &str,
		chain_id: u64,
		private_key_hex: &str,
	) -> Result<Self, ClientError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| ClientError::Rejected(format!("Invalid private key: {}", e)))?;

		Self::new(rpc_url, chain_id, signer)
	}
}

#[async_trait]
impl WalletClient for AlloyWalletClient {
	fn address(&self) -> Address {
		self.address
	}

	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	async fn send_transaction(&self, tx: Transaction) -> Result<TransactionHash, ClientError> {
		let request: TransactionRequest = tx.into();

		let pending_tx = self
			.provider
			.send_transaction(request)
			.await
			.map_err(|e| ClientError::Rejected(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = *pending_tx.tx_hash();
		tracing::info!(tx_hash = %truncate_hash(&tx_hash), "Submitted transaction");

		Ok(tx_hash)
	}
}
