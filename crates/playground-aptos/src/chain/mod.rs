pub mod account;
pub use account::*;

pub mod config;
pub use config::*;

pub mod faucet;
pub use faucet::*;

pub mod provider;
pub use provider::*;

pub mod transaction;
pub use transaction::*;

pub mod types;
pub use types::*;
