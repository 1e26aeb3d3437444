//! Revert reason decoding.
//!
//! Turns the raw bytes a node attaches to a reverted dry-run into a
//! human-readable description: the standard `Error(string)` reason, a
//! `Panic(uint256)` code, or the name of a custom error looked up in the
//! contract's ABI.

use alloy_json_abi::JsonAbi;
use alloy_sol_types::{Panic, PanicKind, Revert, SolError};

/// Fallback description when a failure carries no decodable reason.
pub const SIMULATION_FAILED: &str = "Simulation failed.";

/// Describes raw revert data as a human-readable string.
///
/// When an ABI is supplied, custom error selectors are resolved to their
/// error name and appended in `-> Name` form.
pub fn describe_revert(data: &[u8], abi: Option<&JsonAbi>) -> String {
	if data.len() < 4 {
		return SIMULATION_FAILED.to_string();
	}

	if data.starts_with(&Revert::SELECTOR) {
		if let Ok(revert) = Revert::abi_decode(data, true) {
			return format!("Execution reverted: {}", revert.reason);
		}
	}

	if data.starts_with(&Panic::SELECTOR) {
		if let Ok(panic) = Panic::abi_decode(data, true) {
			let kind = u32::try_from(panic.code)
				.ok()
				.and_then(PanicKind::from_number);
			return match kind {
				Some(kind) => format!("Execution panicked: {}", kind),
				None => format!("Execution panicked (code {})", panic.code),
			};
		}
	}

	let selector = &data[..4];
	if let Some(abi) = abi {
		for error in abi.errors() {
			if error.selector().as_slice() == selector {
				return format!("Execution reverted -> {}", error.name);
			}
		}
	}

	format!(
		"Execution reverted with unknown selector 0x{}",
		hex::encode(selector)
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::U256;

	#[test]
	fn test_decodes_standard_error_string() {
		let revert = Revert::from("insufficient balance");
		let data = revert.abi_encode();
		assert_eq!(
			describe_revert(&data, None),
			"Execution reverted: insufficient balance"
		);
	}

	#[test]
	fn test_decodes_panic_kind() {
		let panic = Panic {
			code: U256::from(0x11u64),
		};
		let data = panic.abi_encode();
		assert_eq!(
			describe_revert(&data, None),
			"Execution panicked: arithmetic underflow or overflow"
		);
	}

	#[test]
	fn test_unknown_panic_code_falls_back_to_number() {
		let panic = Panic {
			code: U256::from(0x99u64),
		};
		let data = panic.abi_encode();
		assert_eq!(
			describe_revert(&data, None),
			"Execution panicked (code 153)"
		);
	}

	#[test]
	fn test_resolves_custom_error_name_from_abi() {
		let abi: JsonAbi = serde_json::from_str(
			r#"[{"type":"error","name":"Unauthorized","inputs":[]}]"#,
		)
		.unwrap();
		let error = abi.errors().next().unwrap();
		let data = error.selector().to_vec();

		assert_eq!(
			describe_revert(&data, Some(&abi)),
			"Execution reverted -> Unauthorized"
		);
	}

	#[test]
	fn test_unknown_selector_falls_back_to_hex() {
		let data = [0xde, 0xad, 0xbe, 0xef];
		assert_eq!(
			describe_revert(&data, None),
			"Execution reverted with unknown selector 0xdeadbeef"
		);
	}

	#[test]
	fn test_empty_data_is_generic() {
		// An argument-less revert() attaches no data at all.
		assert_eq!(describe_revert(&[], None), SIMULATION_FAILED);
	}
}
