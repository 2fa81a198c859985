//! Chain configuration for the supported bridge networks
//!
//! This module contains the supported L1/L2 settlement pairs, the per-chain
//! block explorer URLs, and the expected-chain rule that gates every
//! bridging action.

mod config;
mod explorers;

pub use config::{BridgedChain, ChainPair};
