//! Call shapes and shape classification.
//!
//! A caller describes what it wants to execute with a loose [`CallRequest`];
//! classification turns that into exactly one of the two supported shapes:
//! a contract call (target, ABI, function, arguments) or a raw call
//! (destination, calldata). The shapes are mutually exclusive.

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use thiserror::Error;

use crate::common::{Address, Bytes, U256};

/// Loose transaction description produced by the caller.
///
/// Which shape this request has is determined by [`CallRequest::classify`]:
/// an ABI makes it a contract call, calldata makes it a raw call.
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
	/// Target contract or destination address.
	pub to: Address,
	/// Contract interface description (contract-call shape).
	pub abi: Option<JsonAbi>,
	/// Name of the function to invoke (contract-call shape).
	pub function: Option<String>,
	/// Arguments for the function invocation.
	pub args: Vec<DynSolValue>,
	/// Pre-encoded calldata (raw-call shape).
	pub data: Option<Bytes>,
	/// Value to transfer in native currency.
	pub value: U256,
}

impl CallRequest {
	/// Describes a contract-call request against the given interface.
	pub fn contract(
		to: Address,
		abi: JsonAbi,
		function: impl Into<String>,
		args: Vec<DynSolValue>,
	) -> Self {
		Self {
			to,
			abi: Some(abi),
			function: Some(function.into()),
			args,
			data: None,
			value: U256::ZERO,
		}
	}

	/// Describes a raw-call request with pre-encoded calldata.
	pub fn raw(to: Address, data: Bytes) -> Self {
		Self {
			to,
			abi: None,
			function: None,
			args: Vec::new(),
			data: Some(data),
			value: U256::ZERO,
		}
	}

	/// Sets the native value transferred alongside the call.
	pub fn with_value(mut self, value: U256) -> Self {
		self.value = value;
		self
	}

	/// Determines the shape of this request.
	///
	/// An ABI marks a contract call (a function name is then required);
	/// otherwise calldata marks a raw call. Providing both, or neither,
	/// is a terminal classification error.
	pub fn classify(self) -> Result<CallKind, ClassifyError> {
		match (self.abi, self.data) {
			(Some(_), Some(_)) => Err(ClassifyError::Ambiguous),
			(Some(abi), None) => {
				let function = self.function.ok_or(ClassifyError::MissingFunction)?;
				Ok(CallKind::Contract(ContractCall {
					to: self.to,
					abi,
					function,
					args: self.args,
					value: self.value,
				}))
			}
			(None, Some(data)) => Ok(CallKind::Raw(RawCall {
				to: self.to,
				data,
				value: self.value,
			})),
			(None, None) => Err(ClassifyError::Unrecognized),
		}
	}
}

/// A classified transaction shape.
#[derive(Debug, Clone)]
pub enum CallKind {
	/// Invocation of a smart-contract function via its interface description.
	Contract(ContractCall),
	/// Arbitrary calldata sent to an address without an interface description.
	Raw(RawCall),
}

/// A contract call: target, interface, function name and arguments.
#[derive(Debug, Clone)]
pub struct ContractCall {
	pub to: Address,
	pub abi: JsonAbi,
	pub function: String,
	pub args: Vec<DynSolValue>,
	pub value: U256,
}

/// A raw call: destination and pre-encoded calldata.
#[derive(Debug, Clone)]
pub struct RawCall {
	pub to: Address,
	pub data: Bytes,
	pub value: U256,
}

/// Errors that can occur while classifying a call request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
	#[error("Unsupported transaction shape: both an ABI and raw calldata were provided.")]
	Ambiguous,
	#[error("Contract call is missing a function name.")]
	MissingFunction,
	#[error("Unsupported transaction shape: neither an ABI nor raw calldata was provided.")]
	Unrecognized,
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	fn target() -> Address {
		address!("00000000000000000000000000000000000000aa")
	}

	#[test]
	fn test_classify_contract_call() {
		let request = CallRequest::contract(target(), JsonAbi::default(), "transfer", vec![]);
		match request.classify() {
			Ok(CallKind::Contract(call)) => {
				assert_eq!(call.function, "transfer");
				assert_eq!(call.to, target());
			}
			other => panic!("expected contract call, got {:?}", other),
		}
	}

	#[test]
	fn test_classify_raw_call() {
		let request = CallRequest::raw(target(), Bytes::from(vec![0x01, 0x02]))
			.with_value(U256::from(5u64));
		match request.classify() {
			Ok(CallKind::Raw(call)) => {
				assert_eq!(call.data.as_ref(), &[0x01, 0x02]);
				assert_eq!(call.value, U256::from(5u64));
			}
			other => panic!("expected raw call, got {:?}", other),
		}
	}

	#[test]
	fn test_classify_rejects_ambiguous_shape() {
		let request = CallRequest {
			to: target(),
			abi: Some(JsonAbi::default()),
			function: Some("transfer".to_string()),
			args: vec![],
			data: Some(Bytes::from(vec![0x01])),
			value: U256::ZERO,
		};
		assert_eq!(request.classify().unwrap_err(), ClassifyError::Ambiguous);
	}

	#[test]
	fn test_classify_rejects_empty_shape() {
		let request = CallRequest {
			to: target(),
			..Default::default()
		};
		assert_eq!(request.classify().unwrap_err(), ClassifyError::Unrecognized);
	}

	#[test]
	fn test_classify_requires_function_name() {
		let request = CallRequest {
			to: target(),
			abi: Some(JsonAbi::default()),
			..Default::default()
		};
		assert_eq!(
			request.classify().unwrap_err(),
			ClassifyError::MissingFunction
		);
	}
}
