#![doc = include_str!("../README.md")]
#![deny(
    clippy::nursery,
    clippy::pedantic,
    warnings,
    missing_docs,
    unused_crate_dependencies
)]

pub mod authz;
pub mod builder;
pub mod coins;
pub mod config;
pub mod context;
pub mod encoder;
mod error;
pub mod handler;
pub mod host_msg;
pub mod ibc;
pub mod keeper;
pub mod msg;
pub mod router;
pub mod unpacker;

#[cfg(test)]
pub mod test;

pub use builder::MessengerBuilder;
pub use config::MessengerConfig;
pub use context::Context;
pub use error::DispatchError;
pub use handler::{Messenger, MessageHandlerChain};
pub use msg::{ContractMsg, DispatchResponse, RawCustomMsg};
