//! Move compile-and-simulate gateway.
//!
//! Endpoints:
//! - `GET /` - The playground page: editor, entry function, arguments, output
//! - `GET /simulate` - Description of the simulate endpoint
//! - `POST /simulate` - `{ code, entry, args }` in, `{ output }` or `{ error }` out
//!
//! Each simulation runs `aptos move compile` and `aptos move run` inside its own
//! scratch package, which is deleted before the response is sent.

pub mod config;
pub mod handlers;
pub mod run;

pub use run::run;
