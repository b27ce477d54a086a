//! Sender authorization for the messaging bot.
//!
//! A single authorized phone number is read from a JSON config file at
//! startup. Every inbound message's sender is then checked against it with
//! an exact byte comparison; there is no normalization of either side.
//!
//! Construction failures are returned as [`GateError`]. A rejected sender is
//! not an error: [`AuthorizationGate::verify`] simply returns `false`.

mod config;
mod error;
mod gate;

pub use config::{GateConfig, DEFAULT_CONFIG_PATH};
pub use error::{ConfigIssue, GateError, GateResult};
pub use gate::AuthorizationGate;
