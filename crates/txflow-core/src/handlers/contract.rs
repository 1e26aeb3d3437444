//! Handler for ABI-described contract calls.

use alloy_dyn_abi::JsonAbiExt;
use async_trait::async_trait;
use txflow_clients::ClientError;
use txflow_types::{ContractCall, Transaction, TransactionHash};

use super::{HandlerContext, TransactionHandler};
use crate::revert::{describe_revert, SIMULATION_FAILED};

/// Encodes a contract call through its ABI and dry-runs it with `eth_call`.
pub struct ContractHandler;

#[async_trait]
impl TransactionHandler for ContractHandler {
	type Call = ContractCall;
	type Prepared = Transaction;

	async fn simulate(
		&self,
		call: ContractCall,
		ctx: &HandlerContext<'_>,
	) -> Option<Transaction> {
		// Functions are overloadable; pick the overload matching the
		// argument count, falling back to the first one declared.
		let function = match call.abi.function(&call.function).and_then(|overloads| {
			overloads
				.iter()
				.find(|function| function.inputs.len() == call.args.len())
				.or_else(|| overloads.first())
		}) {
			Some(function) => function,
			None => {
				ctx.report_failure(
					format!("Function `{}` not found in the ABI.", call.function),
					None,
				);
				return None;
			}
		};

		let data = match function.abi_encode_input(&call.args) {
			Ok(data) => data,
			Err(e) => {
				ctx.report_failure(
					format!("Failed to encode arguments for `{}`.", call.function),
					Some(e.into()),
				);
				return None;
			}
		};

		let tx = Transaction {
			from: Some(ctx.wallet_client.address()),
			to: Some(call.to),
			data,
			value: call.value,
			chain_id: ctx.wallet_client.chain_id(),
			..Transaction::default()
		};

		if !ctx.simulate {
			return Some(tx);
		}

		match ctx.read_client.call(&tx).await {
			Ok(_) => Some(tx),
			Err(ClientError::Reverted { data }) => {
				ctx.report_failure(describe_revert(&data, Some(&call.abi)), None);
				None
			}
			Err(e) => {
				ctx.report_failure(SIMULATION_FAILED, Some(e.into()));
				None
			}
		}
	}

	async fn submit(
		&self,
		prepared: Transaction,
		ctx: &HandlerContext<'_>,
	) -> Option<TransactionHash> {
		match ctx.wallet_client.send_transaction(prepared).await {
			Ok(hash) => Some(hash),
			Err(e) => {
				ctx.report_failure("Transaction rejected.", Some(e.into()));
				None
			}
		}
	}
}
