//! Workflow notifications and the reporter hook set.
//!
//! Every phase of a transaction workflow reports through a [`Reporter`]:
//! three hook slots (error, update, success) that a host application can
//! override individually, for example to drive toast notifications in a UI.
//! Hooks that are not overridden fall back to `tracing` output.

use crate::common::TransactionHash;

/// A plain notification with a short title and a longer description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub title: String,
	pub description: String,
}

impl Notification {
	pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
		}
	}
}

/// How long a host should keep an update notification visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDuration {
	Short,
	Long,
}

/// Extra context attached to an update notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
	/// The update refers to a submitted transaction the host can link to.
	ViewTransaction { hash: TransactionHash },
}

/// A progress update emitted while the workflow advances through its phases.
#[derive(Debug, Clone)]
pub struct UpdateNotification {
	pub title: String,
	pub description: String,
	pub duration: UpdateDuration,
	pub kind: Option<UpdateKind>,
}

impl UpdateNotification {
	pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			duration: UpdateDuration::Short,
			kind: None,
		}
	}

	pub fn with_duration(mut self, duration: UpdateDuration) -> Self {
		self.duration = duration;
		self
	}

	pub fn with_kind(mut self, kind: UpdateKind) -> Self {
		self.kind = Some(kind);
		self
	}
}

/// A failure notification, optionally carrying the underlying cause.
#[derive(Debug)]
pub struct ErrorNotification {
	pub title: String,
	pub description: String,
	pub source: Option<anyhow::Error>,
}

impl ErrorNotification {
	pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			source: None,
		}
	}

	pub fn with_source(mut self, source: anyhow::Error) -> Self {
		self.source = Some(source);
		self
	}
}

type ErrorHook = Box<dyn Fn(ErrorNotification) + Send + Sync>;
type UpdateHook = Box<dyn Fn(UpdateNotification) + Send + Sync>;
type SuccessHook = Box<dyn Fn(Notification) + Send + Sync>;

/// The three hook slots a workflow reports through.
///
/// Defaults log through `tracing`; each slot can be replaced independently.
pub struct Reporter {
	on_error: ErrorHook,
	on_update: UpdateHook,
	on_success: SuccessHook,
}

impl Default for Reporter {
	fn default() -> Self {
		Self::new()
	}
}

impl Reporter {
	/// Creates a reporter with the default `tracing` hooks.
	pub fn new() -> Self {
		Self {
			on_error: Box::new(default_on_error),
			on_update: Box::new(default_on_update),
			on_success: Box::new(default_on_success),
		}
	}

	/// Replaces the error hook.
	pub fn with_on_error<F>(mut self, hook: F) -> Self
	where
		F: Fn(ErrorNotification) + Send + Sync + 'static,
	{
		self.on_error = Box::new(hook);
		self
	}

	/// Replaces the update hook.
	pub fn with_on_update<F>(mut self, hook: F) -> Self
	where
		F: Fn(UpdateNotification) + Send + Sync + 'static,
	{
		self.on_update = Box::new(hook);
		self
	}

	/// Replaces the success hook.
	pub fn with_on_success<F>(mut self, hook: F) -> Self
	where
		F: Fn(Notification) + Send + Sync + 'static,
	{
		self.on_success = Box::new(hook);
		self
	}

	pub fn error(&self, notification: ErrorNotification) {
		(self.on_error)(notification);
	}

	pub fn update(&self, notification: UpdateNotification) {
		(self.on_update)(notification);
	}

	pub fn success(&self, notification: Notification) {
		(self.on_success)(notification);
	}
}

fn default_on_error(notification: ErrorNotification) {
	match &notification.source {
		Some(source) => tracing::error!(
			source = ?source,
			"{}: {}",
			notification.title,
			notification.description
		),
		None => tracing::error!("{}: {}", notification.title, notification.description),
	}
}

fn default_on_update(notification: UpdateNotification) {
	tracing::info!("{}: {}", notification.title, notification.description);
}

fn default_on_success(notification: Notification) {
	tracing::info!("{}: {}", notification.title, notification.description);
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::{Arc, Mutex};

	#[test]
	fn test_hooks_can_be_replaced_individually() {
		let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
		let sink = errors.clone();
		let reporter =
			Reporter::new().with_on_error(move |n| sink.lock().unwrap().push(n.description));

		reporter.error(ErrorNotification::new("Transaction failed", "boom"));
		// Update and success still use the defaults and must not panic.
		reporter.update(UpdateNotification::new("Simulating transaction", "wait"));
		reporter.success(Notification::new("Success!", "done"));

		assert_eq!(errors.lock().unwrap().as_slice(), ["boom".to_string()]);
	}

	#[test]
	fn test_update_notification_builder() {
		let hash = TransactionHash::from([0x11u8; 32]);
		let update = UpdateNotification::new("Transaction submitted", "waiting")
			.with_duration(UpdateDuration::Long)
			.with_kind(UpdateKind::ViewTransaction { hash });

		assert_eq!(update.duration, UpdateDuration::Long);
		assert_eq!(update.kind, Some(UpdateKind::ViewTransaction { hash }));
	}
}
