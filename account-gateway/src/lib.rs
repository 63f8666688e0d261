//! Aptos account and transaction gateway.
//!
//! Endpoints (all `POST`, JSON in and out):
//! - `/generate-account` - Fresh `{ address, privateKey }`
//! - `/fund-account` - Faucet funding, `{ address, amount }`
//! - `/init-module`, `/hello` - Argument-less calls into the playground module
//! - `/mint-nft`, `/mint-token` - Mint with a `uri` or an `amount`
//! - `/transfer-token`, `/transfer-nft` - Transfer to `recipientAddress`
//!
//! Transactions target `<MODULE_ADDRESS>::main::<function>` and are signed with the
//! private key supplied in the request body. Failures come back as
//! `{ "error": "<message>" }` with status 400 or 500.

pub mod config;
pub mod gateway;
pub mod handlers;
pub mod run;

pub use gateway::AccountGateway;
pub use run::run;
