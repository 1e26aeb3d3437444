//! Chain-level transaction representation.
//!
//! This module defines the transaction type handed to clients for simulation
//! and submission, together with conversions to and from Alloy's RPC
//! transaction request.

use alloy_primitives::{Bytes, TxKind, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};

use crate::common::Address;

/// Blockchain transaction representation.
///
/// Contains all fields necessary for constructing and submitting transactions.
/// Optional fields are filled in by the client (nonce, gas, fees) when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
	/// Sender address (None when the wallet fills it in).
	pub from: Option<Address>,
	/// Recipient address (None for contract creation).
	pub to: Option<Address>,
	/// Transaction data/calldata.
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Transaction nonce (optional, can be filled by provider).
	pub nonce: Option<u64>,
	/// Gas limit for transaction execution.
	pub gas_limit: Option<u64>,
	/// Legacy gas price (for non-EIP-1559 transactions).
	pub gas_price: Option<u128>,
	/// Maximum fee per gas (EIP-1559).
	pub max_fee_per_gas: Option<u128>,
	/// Maximum priority fee per gas (EIP-1559).
	pub max_priority_fee_per_gas: Option<u128>,
}

/// Conversion from Alloy's TransactionRequest to our Transaction type.
impl From<TransactionRequest> for Transaction {
	fn from(req: TransactionRequest) -> Self {
		Transaction {
			from: req.from,
			to: req.to.and_then(|kind| match kind {
				TxKind::Call(address) => Some(address),
				TxKind::Create => None,
			}),
			data: req.input.into_input().unwrap_or_default().to_vec(),
			value: req.value.unwrap_or(U256::ZERO),
			chain_id: req.chain_id.unwrap_or(1),
			nonce: req.nonce,
			gas_limit: req.gas,
			gas_price: req.gas_price,
			max_fee_per_gas: req.max_fee_per_gas,
			max_priority_fee_per_gas: req.max_priority_fee_per_gas,
		}
	}
}

/// Conversion to Alloy's TransactionRequest for client submission.
impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		TransactionRequest {
			from: tx.from,
			to: tx.to.map(TxKind::Call),
			input: TransactionInput::new(Bytes::from(tx.data)),
			value: Some(tx.value),
			chain_id: Some(tx.chain_id),
			nonce: tx.nonce,
			gas: tx.gas_limit,
			gas_price: tx.gas_price,
			max_fee_per_gas: tx.max_fee_per_gas,
			max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
			..Default::default()
		}
	}
}
