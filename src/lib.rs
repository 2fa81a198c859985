//! # op-bridge
//!
//! A Rust SDK for bridging ETH between an L1 and an OP Stack L2.
//!
//! This library owns the bridging *session*: which step of the transfer
//! flow the user is in, which chain their wallet must be on, the amount
//! input, and the log feed a render surface displays. The heavy lifting
//! (transaction construction, proof generation, relaying, finality
//! tracking) is delegated to a cross-chain messenger service behind the
//! [`CrossChainMessenger`] trait, and wallet interaction goes through
//! [`WalletProvider`].
//!
//! ## Transfer flows
//!
//! - **Deposit (L1 to L2)**: one step. Submit the deposit, await the L1
//!   confirmation and the L2 relay receipt.
//! - **Withdrawal (L2 to L1)**: two steps. Submit the withdrawal and wait
//!   until it is ready to prove, then prove and finalize it on L1 once the
//!   challenge period has passed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use op_bridge::{Action, BridgeController, ChainPair, PollingConfig};
//! use op_bridge::testing::{FakeMessenger, FakeMessengerFactory, FakeWallet};
//! use alloy_primitives::address;
//!
//! # async fn example() -> Result<(), op_bridge::BridgeError> {
//! // Swap the fakes for your wallet provider and messenger factory
//! let wallet = FakeWallet::connected(
//!     address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d"),
//!     11_155_111,
//! );
//! let factory = FakeMessengerFactory::new(FakeMessenger::new());
//!
//! let mut controller = BridgeController::builder()
//!     .wallet(wallet)
//!     .messenger_factory(factory)
//!     .chains(ChainPair::sepolia_base())
//!     .polling(PollingConfig::default())
//!     .build();
//!
//! controller.set_amount("0.001");
//! match controller.action().await? {
//!     Action::SwitchNetwork { .. } => controller.switch_to_expected_chain().await?,
//!     Action::Bridge(_) => controller.handle_action().await?,
//! }
//! for entry in controller.session().logs() {
//!     println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`BridgeController`] and [`BridgeSession`] - The step state machine
//!   and the session state it drives
//! - [`CrossChainMessenger`], [`WalletProvider`], [`MessengerFactory`] -
//!   Traits for the external collaborators
//! - [`ChainPair`] and [`BridgedChain`] - Supported settlement pairs and
//!   explorer lookups
//! - [`MessageStatus`], [`TransferDirection`] - Messenger-facing protocol
//!   types
//! - [`BridgeError`] and [`Result`] - Error types for error handling
//! - [`testing`] - Fake collaborators for driving the controller in tests

mod amount;
mod bridge;
mod chain;
mod error;
mod protocol;
mod traits;

pub use amount::parse_eth_amount;
pub use bridge::{
    Action, ActionKind, BridgeController, BridgeSession, LogEntry, PollingConfig,
    DEFAULT_AMOUNT_ETH,
};
pub use chain::{BridgedChain, ChainPair};
pub use error::{BridgeError, Result};
pub use protocol::{
    MessageReceipt, MessageStatus, SubmittedTransaction, TransferDirection, WalletIdentity,
};
pub use traits::{CrossChainMessenger, MessengerFactory, WalletProvider};

// Production collaborator implementations
pub mod providers;

// Public module for advanced users who need custom instrumentation
pub mod spans;

// Fake collaborators, exported for downstream embedders' tests
pub mod testing;
