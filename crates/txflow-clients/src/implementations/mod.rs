//! Client implementations.
//!
//! This module contains concrete implementations of the `ReadClient` and
//! `WalletClient` traits for EVM-compatible chains.
//!
//! Available implementations:
//! - `alloy`: HTTP JSON-RPC clients built on the Alloy library

pub mod alloy;
