//! Aptos chain support for the playground's account gateway.
//!
//! Everything here is a thin layer over the aptos-core crates: keys come from
//! `aptos-crypto`, transactions from `aptos-types`, node access from
//! `aptos-rest-client`. The crate's job is to give the gateway a small, testable
//! seam over them.
//!
//! # Architecture
//!
//! - `networks` - The [`AptosNetwork`] selector and its well-known endpoints
//! - [`chain::config`] - Resolved node / faucet / module configuration
//! - [`chain::types`] - [`Address`](chain::Address) and [`AptosPrivateKey`](chain::AptosPrivateKey) wire types
//! - [`chain::account`] - Account generation and derivation from a private key
//! - [`chain::transaction`] - Entry-function calls with typed, BCS-encoded arguments
//! - [`chain::faucet`] - HTTP client for the faucet service
//! - [`chain::provider`] - The [`AptosProviderOps`](chain::AptosProviderOps) seam and its REST-backed implementation
//!
//! # Usage
//!
//! ```ignore
//! use playground_aptos::chain::{AptosAccount, AptosChainProvider, AptosProviderOps, EntryFunctionCall};
//!
//! let provider = AptosChainProvider::from_config(&config)?;
//! let sender = AptosAccount::from_private_key(&private_key)?;
//! let call = EntryFunctionCall::new(module_address, "main", "hello", vec![]);
//! let committed = provider.submit_entry_function(&sender, &call).await?;
//! ```

pub mod chain;

mod networks;
pub use networks::*;
