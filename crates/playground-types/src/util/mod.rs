//! Process-level helpers shared by the playground binaries.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`sig_down`] | Graceful shutdown signal handling |
//! | [`telemetry`] | Tracing subscriber, OpenTelemetry export and HTTP request tracing |

pub mod sig_down;
pub mod telemetry;

pub use sig_down::*;
pub use telemetry::*;
