//! Transaction workflow orchestration.
//!
//! [`perform_transaction`] drives one transaction through a fixed phase
//! sequence: validate clients, obtain the call description, classify its
//! shape, simulate (optional), request a signature and submit, wait for
//! confirmation, and report the outcome. Every phase reports through the
//! configured [`Reporter`] hooks and no failure ever propagates to the
//! caller; a halted workflow simply returns `None`.

use std::future::Future;
use std::sync::Arc;

pub mod handlers;
pub mod revert;

pub use txflow_clients::{
	AlloyReadClient, AlloyWalletClient, ClientError, ConfirmationPolicy, ReadClient, WalletClient,
};
pub use txflow_types::{
	CallKind, CallRequest, ContractCall, ErrorNotification, Notification, RawCall, Reporter,
	Transaction, TransactionHash, TransactionReceipt, UpdateDuration, UpdateKind,
	UpdateNotification,
};

use handlers::{ContractHandler, HandlerContext, RawHandler, TransactionHandler};

/// Everything one workflow run needs.
///
/// Built with [`PerformTransactionParams::new`] and the `with_*` setters,
/// then consumed by [`perform_transaction`].
pub struct PerformTransactionParams<F> {
	read_client: Option<Arc<dyn ReadClient>>,
	wallet_client: Option<Arc<dyn WalletClient>>,
	producer: F,
	reporter: Reporter,
	transaction_name: String,
	simulate: bool,
	confirmation: ConfirmationPolicy,
	on_submitted: Option<Box<dyn FnOnce(&TransactionHash) + Send>>,
	on_confirmed: Option<Box<dyn FnOnce(&TransactionReceipt) + Send>>,
}

impl<F> PerformTransactionParams<F> {
	/// Creates parameters around an async call-producing closure.
	///
	/// The closure runs once, after the clients have been validated; it may
	/// resolve to `None` to abandon the workflow silently.
	pub fn new(producer: F) -> Self {
		Self {
			read_client: None,
			wallet_client: None,
			producer,
			reporter: Reporter::default(),
			transaction_name: "Transaction".to_string(),
			simulate: true,
			confirmation: ConfirmationPolicy::default(),
			on_submitted: None,
			on_confirmed: None,
		}
	}

	pub fn with_read_client(mut self, client: Option<Arc<dyn ReadClient>>) -> Self {
		self.read_client = client;
		self
	}

	pub fn with_wallet_client(mut self, client: Option<Arc<dyn WalletClient>>) -> Self {
		self.wallet_client = client;
		self
	}

	pub fn with_reporter(mut self, reporter: Reporter) -> Self {
		self.reporter = reporter;
		self
	}

	/// Display name used in notification titles.
	pub fn with_transaction_name(mut self, name: impl Into<String>) -> Self {
		self.transaction_name = name.into();
		self
	}

	/// Whether to dry-run before requesting a signature (default true).
	pub fn with_simulate(mut self, simulate: bool) -> Self {
		self.simulate = simulate;
		self
	}

	pub fn with_confirmation_policy(mut self, policy: ConfirmationPolicy) -> Self {
		self.confirmation = policy;
		self
	}

	/// Invoked once with the transaction hash right after broadcast.
	pub fn on_submitted<C>(mut self, callback: C) -> Self
	where
		C: FnOnce(&TransactionHash) + Send + 'static,
	{
		self.on_submitted = Some(Box::new(callback));
		self
	}

	/// Invoked once with the receipt after confirmation.
	pub fn on_confirmed<C>(mut self, callback: C) -> Self
	where
		C: FnOnce(&TransactionReceipt) + Send + 'static,
	{
		self.on_confirmed = Some(Box::new(callback));
		self
	}
}

/// Performs one transaction end to end.
///
/// Returns the receipt on full success and `None` whenever a phase halted
/// the workflow; the reporter hooks carry the details either way.
pub async fn perform_transaction<F, Fut>(
	params: PerformTransactionParams<F>,
) -> Option<TransactionReceipt>
where
	F: FnOnce() -> Fut + Send,
	Fut: Future<Output = Option<CallRequest>> + Send,
{
	let PerformTransactionParams {
		read_client,
		wallet_client,
		producer,
		reporter,
		transaction_name,
		simulate,
		confirmation,
		on_submitted,
		on_confirmed,
	} = params;

	let (read_client, wallet_client) = match (read_client, wallet_client) {
		(Some(read_client), Some(wallet_client)) => (read_client, wallet_client),
		(read_client, _) => {
			let missing = if read_client.is_some() {
				"Wallet"
			} else {
				"Read"
			};
			reporter.error(ErrorNotification::new(
				format!("{} failed", transaction_name),
				format!("{} client is missing.", missing),
			));
			return None;
		}
	};

	tracing::debug!(name = %transaction_name, simulate, "Starting transaction workflow");

	// A producer resolving to None abandons the workflow without any
	// notification; the caller decided not to transact after all.
	let request = producer().await?;

	let kind = match request.classify() {
		Ok(kind) => kind,
		Err(e) => {
			reporter.error(
				ErrorNotification::new(format!("{} failed", transaction_name), e.to_string())
					.with_source(e.into()),
			);
			return None;
		}
	};

	reporter.update(UpdateNotification::new(
		"Simulating transaction",
		"Please wait for the simulation to finish...",
	));

	let ctx = HandlerContext {
		read_client: read_client.as_ref(),
		wallet_client: wallet_client.as_ref(),
		reporter: &reporter,
		transaction_name: &transaction_name,
		simulate,
	};

	let hash = match kind {
		CallKind::Contract(call) => drive(&ContractHandler, call, &ctx).await?,
		CallKind::Raw(call) => drive(&RawHandler, call, &ctx).await?,
	};

	reporter.update(
		UpdateNotification::new(
			format!("{} submitted", transaction_name),
			"Waiting until confirmed on the blockchain...",
		)
		.with_duration(UpdateDuration::Long)
		.with_kind(UpdateKind::ViewTransaction { hash }),
	);
	if let Some(callback) = on_submitted {
		callback(&hash);
	}

	let receipt = match read_client.wait_for_receipt(&hash, &confirmation).await {
		Ok(receipt) => receipt,
		Err(e) => {
			reporter.error(
				ErrorNotification::new(format!("{} failed", transaction_name), e.to_string())
					.with_source(e.into()),
			);
			return None;
		}
	};

	reporter.success(Notification::new(
		"Success!",
		format!("{} performed successfully.", transaction_name),
	));
	if let Some(callback) = on_confirmed {
		callback(&receipt);
	}

	Some(receipt)
}

/// Runs one handler through its simulate and submit steps, emitting the
/// signature prompt between them.
async fn drive<H>(
	handler: &H,
	call: H::Call,
	ctx: &HandlerContext<'_>,
) -> Option<TransactionHash>
where
	H: TransactionHandler,
{
	let prepared = handler.simulate(call, ctx).await?;

	ctx.reporter.update(UpdateNotification::new(
		"Generating transaction",
		"Please sign the transaction in your wallet...",
	));

	handler.submit(prepared, ctx).await
}
