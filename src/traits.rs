//! Core trait abstractions for bridge collaborators.
//!
//! The controller talks to two external systems it does not own: the user's
//! wallet (connected account, active chain, chain switching) and the
//! cross-chain messenger service that drives message state to completion.
//! Both are behind traits so that fake implementations can exercise the
//! step machine without a browser wallet or live chains; see
//! [`crate::testing`].

use alloy_primitives::{Address, ChainId, TxHash, U256};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::bridge::PollingConfig;
use crate::error::{BridgeError, Result};
use crate::protocol::{
    MessageReceipt, MessageStatus, SubmittedTransaction, TransferDirection, WalletIdentity,
};
use crate::spans;

/// Trait for wallet and chain-selection operations.
///
/// This is the surface a browser wallet (or a wallet-backed RPC endpoint)
/// exposes to the bridge: who is connected, which chain is active, and the
/// ability to request a switch to another chain. A switch request is
/// asynchronous and may fail or be rejected by the user.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Returns the connected account, or `None` if no wallet is connected.
    async fn address(&self) -> Result<Option<Address>>;

    /// Returns the chain id the wallet is currently on.
    async fn chain_id(&self) -> Result<ChainId>;

    /// Requests a switch to the given chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet refuses the switch or the request
    /// fails in transport.
    async fn switch_chain(&self, chain_id: ChainId) -> Result<()>;
}

/// Trait for the cross-chain messenger service.
///
/// The messenger owns everything hard about bridging: transaction
/// construction, proof generation, relaying, and finality tracking. This
/// crate only issues requests against it and observes the resulting message
/// statuses. An implementation is bound to one [`WalletIdentity`]; the
/// controller derives a fresh instance through a [`MessengerFactory`]
/// whenever that identity changes.
#[async_trait]
pub trait CrossChainMessenger: Send + Sync {
    /// Submits an ETH deposit on L1 for the given wei amount.
    async fn deposit_eth(&self, amount: U256) -> Result<SubmittedTransaction>;

    /// Submits an ETH withdrawal on L2 for the given wei amount.
    async fn withdraw_eth(&self, amount: U256) -> Result<SubmittedTransaction>;

    /// Submits the withdrawal proof for a message on L1.
    async fn prove_message(&self, tx_hash: TxHash) -> Result<SubmittedTransaction>;

    /// Finalizes a proven message on L1, releasing the funds.
    async fn finalize_message(&self, tx_hash: TxHash) -> Result<SubmittedTransaction>;

    /// Waits until a submitted transaction is confirmed on its own chain.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()>;

    /// Returns the current L2 block number.
    async fn l2_block_number(&self) -> Result<u64>;

    /// Waits for the destination-chain receipt of a cross-chain message,
    /// scanning from the given destination block.
    async fn wait_for_message_receipt(
        &self,
        tx_hash: TxHash,
        from_block: u64,
    ) -> Result<MessageReceipt>;

    /// Returns the current lifecycle status of a cross-chain message.
    async fn message_status(&self, tx_hash: TxHash) -> Result<MessageStatus>;

    /// Estimates the seconds remaining until a message can complete.
    async fn estimate_wait_time_secs(
        &self,
        tx_hash: TxHash,
        direction: TransferDirection,
        from_block: u64,
    ) -> Result<u64>;

    /// Polls [`message_status`](Self::message_status) until it reaches
    /// `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A status query fails
    /// - The message reaches a failure status
    /// - The maximum number of attempts is reached (timeout)
    async fn wait_for_message_status(
        &self,
        tx_hash: TxHash,
        target: MessageStatus,
        polling: PollingConfig,
    ) -> Result<()> {
        let span = spans::wait_for_message_status(
            tx_hash,
            target,
            polling.max_attempts,
            polling.poll_interval_secs,
        );
        let _guard = span.enter();

        for attempt in 1..=polling.max_attempts {
            let status = self.message_status(tx_hash).await?;

            if status == target {
                info!(status = %status, attempt = attempt, event = "message_status_reached");
                return Ok(());
            }

            if status.is_failure() {
                spans::record_error(&BridgeError::MessageFailed { status });
                error!(status = %status, event = "message_failed");
                return Err(BridgeError::MessageFailed { status });
            }

            debug!(
                status = %status,
                attempt = attempt,
                event = "message_status_pending"
            );
            sleep(Duration::from_secs(polling.poll_interval_secs)).await;
        }

        error!(
            target = %target,
            total_wait_secs = polling.total_timeout_secs(),
            event = "message_status_timeout"
        );
        Err(BridgeError::StatusTimeout {
            target,
            waited_secs: polling.total_timeout_secs(),
        })
    }
}

/// Factory deriving a messenger instance for a wallet identity.
///
/// The validity of a messenger depends on the connected address and active
/// chain it was built against. The controller observes the wallet identity
/// before each operation and calls [`create`](Self::create) when it differs
/// from the cached one; any operation still running against the previous
/// instance is treated as abandoned, not cancelled.
pub trait MessengerFactory: Send + Sync {
    /// The messenger type this factory produces.
    type Messenger: CrossChainMessenger + Clone;

    /// Builds a messenger bound to the given identity.
    fn create(&self, identity: &WalletIdentity) -> Self::Messenger;
}
