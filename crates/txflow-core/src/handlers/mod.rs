//! Transaction handlers.
//!
//! A handler knows how to take one call shape through the two network-facing
//! steps of the workflow: `simulate` (dry-run and preparation) and `submit`
//! (signature and broadcast). Failures are reported through the context's
//! reporter and collapse the step to `None`; the orchestrator then halts.
//!
//! Available implementations:
//! - `contract`: ABI-described contract calls
//! - `raw`: pre-encoded calldata sent as-is

use async_trait::async_trait;
use txflow_clients::{ReadClient, WalletClient};
use txflow_types::{ErrorNotification, Reporter, TransactionHash};

pub mod contract;
pub mod raw;

pub use contract::ContractHandler;
pub use raw::RawHandler;

/// Shared state a handler operates against for one workflow run.
pub struct HandlerContext<'a> {
	pub read_client: &'a dyn ReadClient,
	pub wallet_client: &'a dyn WalletClient,
	pub reporter: &'a Reporter,
	/// Display name used in notification titles.
	pub transaction_name: &'a str,
	/// Whether `simulate` actually dry-runs or just passes through.
	pub simulate: bool,
}

impl HandlerContext<'_> {
	/// Reports a phase failure under the workflow's display name.
	pub fn report_failure(&self, description: impl Into<String>, source: Option<anyhow::Error>) {
		self.reporter.error(ErrorNotification {
			title: format!("{} failed", self.transaction_name),
			description: description.into(),
			source,
		});
	}
}

/// The two-step contract every transaction shape implements.
///
/// `simulate` turns a call into a prepared transaction (optionally
/// dry-running it first); `submit` signs and broadcasts the prepared
/// transaction. Both report failures themselves and return `None` to halt
/// the workflow.
#[async_trait]
pub trait TransactionHandler: Send + Sync {
	type Call: Send;
	type Prepared: Send;

	async fn simulate(
		&self,
		call: Self::Call,
		ctx: &HandlerContext<'_>,
	) -> Option<Self::Prepared>;

	async fn submit(
		&self,
		prepared: Self::Prepared,
		ctx: &HandlerContext<'_>,
	) -> Option<TransactionHash>;
}
