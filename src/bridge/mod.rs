//! The bridge step controller and its session state
//!
//! This is the core of the crate: the step state machine keyed by
//! (direction, step), the ephemeral session it operates on, and the
//! polling configuration its wait loops use.

mod config;
mod controller;
mod session;

pub use config::PollingConfig;
pub use controller::{Action, BridgeController};
pub use session::{ActionKind, BridgeSession, LogEntry, DEFAULT_AMOUNT_ETH};
