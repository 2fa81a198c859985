//! Production implementations of the collaborator traits.

mod alloy;

pub use alloy::AlloyWallet;
