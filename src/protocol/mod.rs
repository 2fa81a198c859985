//! Messenger-facing protocol types
//!
//! This module contains the data types exchanged with the cross-chain
//! messenger service: message lifecycle statuses, transfer directions,
//! and the handles returned by submitted transactions.

mod status;
mod types;

pub use status::MessageStatus;
pub use types::{MessageReceipt, SubmittedTransaction, TransferDirection, WalletIdentity};
