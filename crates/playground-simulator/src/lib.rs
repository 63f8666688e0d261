//! Move compilation and simulation in per-request scratch workspaces.
//!
//! A simulation request materializes submitted Move source plus a `Move.toml`
//! manifest in a fresh directory, hands that directory to a [`ToolchainRunner`]
//! (the Aptos CLI in production), and reports the captured output. The directory
//! never outlives the request: it is removed explicitly on the normal path and by
//! a `Drop` guard on every other path, including cancelled futures.
//!
//! # Modules
//!
//! - [`workspace`] - [`ScratchWorkspace`], the uniquely named request directory
//! - [`manifest`] - Built-in and file-based `Move.toml` templates
//! - [`runner`] - The [`ToolchainRunner`] seam and the [`AptosCliRunner`] subprocess implementation
//! - [`simulator`] - The [`Simulator`] service tying the three together

pub mod manifest;
pub mod runner;
pub mod simulator;
pub mod workspace;

pub use manifest::ManifestSource;
pub use runner::{AptosCliRunner, ToolchainError, ToolchainOutput, ToolchainRunner};
pub use simulator::{SimulationError, SimulationOutput, SimulationRequest, Simulator};
pub use workspace::{ScratchWorkspace, WorkspaceError};
