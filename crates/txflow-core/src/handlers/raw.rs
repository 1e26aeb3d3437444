//! Handler for raw calls with pre-encoded calldata.

use async_trait::async_trait;
use txflow_clients::ClientError;
use txflow_types::{RawCall, Transaction, TransactionHash};

use super::{HandlerContext, TransactionHandler};
use crate::revert::{describe_revert, SIMULATION_FAILED};

/// Sends pre-encoded calldata as-is; the dry-run goes through fee and gas
/// preparation, where estimation surfaces reverts.
pub struct RawHandler;

#[async_trait]
impl TransactionHandler for RawHandler {
	type Call = RawCall;
	type Prepared = Transaction;

	async fn simulate(&self, call: RawCall, ctx: &HandlerContext<'_>) -> Option<Transaction> {
		let tx = Transaction {
			from: Some(ctx.wallet_client.address()),
			to: Some(call.to),
			data: call.data.to_vec(),
			value: call.value,
			chain_id: ctx.wallet_client.chain_id(),
			..Transaction::default()
		};

		if !ctx.simulate {
			return Some(tx);
		}

		match ctx.read_client.prepare(tx).await {
			Ok(prepared) => Some(prepared),
			Err(ClientError::Reverted { data }) => {
				// No interface description here, so only the standard
				// Error(string) and Panic reasons can be decoded.
				ctx.report_failure(describe_revert(&data, None), None);
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
