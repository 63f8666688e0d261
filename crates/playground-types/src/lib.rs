//! Shared plumbing for the Aptos playground services.
//!
//! Both HTTP services (the account gateway and the simulation gateway) are thin
//! pass-throughs to external collaborators. What they share is everything around
//! that: how errors reach the caller, how configuration is resolved, how the process
//! logs and shuts down.
//!
//! # Modules
//!
//! - [`config`] - `LiteralOrEnv` values, env-backed defaults and JSON config loading
//! - [`error`] - The [`ApiError`](error::ApiError) taxonomy and its JSON error body
//! - [`extract`] - [`ApiJson`](extract::ApiJson), a JSON extractor rejecting with `ApiError`
//! - [`util`] - Graceful shutdown and telemetry setup

pub mod config;
pub mod error;
pub mod extract;
pub mod util;
