use alloy_chains::NamedChain;
use alloy_primitives::{ChainId, TxHash, U256};
use bon::Builder;
use tracing::{debug, error, info};

use super::config::PollingConfig;
use super::session::{ActionKind, BridgeSession, LogEntry};
use crate::amount::parse_eth_amount;
use crate::chain::{BridgedChain, ChainPair};
use crate::error::{BridgeError, Result};
use crate::protocol::{MessageStatus, TransferDirection, WalletIdentity};
use crate::spans;
use crate::traits::{CrossChainMessenger, MessengerFactory, WalletProvider};

/// What the render surface should offer the user right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// The wallet is on the wrong chain; the only available control is a
    /// switch to `target`.
    SwitchNetwork { target: NamedChain },
    /// The wallet is on the expected chain; offer the step's action.
    Bridge(ActionKind),
}

/// The bridge step controller.
///
/// Tracks which step of the two-direction transfer flow the session is in
/// and issues the corresponding request against the cross-chain messenger.
/// The controller owns the [`BridgeSession`] and enforces its contract:
///
/// - at most one bridging operation in flight (busy flag);
/// - steps only advance, never retreat;
/// - any messenger failure clears the busy flag, leaves the step unchanged,
///   and is reported to diagnostics only, so the user retries the same step;
/// - the wallet must be on `expected_chain(direction, step)` before any
///   bridging call is issued.
///
/// The messenger instance is derived from the observed wallet identity and
/// re-derived whenever that identity changes. Identity changes are observed
/// between operations; an operation that is already running keeps the
/// instance it captured. Dropping an in-flight operation future abandons
/// the session mid-step with the busy flag still set; recover with
/// [`reset`](Self::reset), the page-reload analogue.
///
/// # Example
///
/// ```rust,no_run
/// # use op_bridge::{BridgeController, ChainPair, PollingConfig};
/// # use op_bridge::testing::{FakeMessenger, FakeMessengerFactory, FakeWallet};
/// # use alloy_primitives::address;
/// # async fn example() -> Result<(), op_bridge::BridgeError> {
/// let wallet = FakeWallet::connected(
///     address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d"),
///     11_155_111,
/// );
/// let mut controller = BridgeController::builder()
///     .wallet(wallet)
///     .messenger_factory(FakeMessengerFactory::new(FakeMessenger::new()))
///     .chains(ChainPair::sepolia_base())
///     .polling(PollingConfig::default())
///     .build();
///
/// controller.set_amount("0.001");
/// controller.handle_action().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder)]
pub struct BridgeController<W, F>
where
    W: WalletProvider,
    F: MessengerFactory,
{
    wallet: W,
    messenger_factory: F,
    #[builder(default)]
    chains: ChainPair,
    #[builder(default)]
    polling: PollingConfig,
    #[builder(skip)]
    session: BridgeSession,
    #[builder(skip)]
    context: Option<(WalletIdentity, F::Messenger)>,
}

impl<W, F> BridgeController<W, F>
where
    W: WalletProvider,
    F: MessengerFactory,
{
    /// Returns the session state for rendering
    pub fn session(&self) -> &BridgeSession {
        &self.session
    }

    /// Returns the configured chain pair
    pub fn chains(&self) -> &ChainPair {
        &self.chains
    }

    /// Replaces the amount input text
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.session.set_amount(amount);
    }

    /// Swaps source and destination networks, toggling the direction
    ///
    /// # Errors
    ///
    /// Rejected while an operation is in flight.
    pub fn flip_networks(&mut self) -> Result<()> {
        self.session.flip_networks()
    }

    /// Abandons the session, returning every field to its initial value.
    ///
    /// Unlike the restart action this is not gated on the busy flag: it is
    /// the recovery path when an in-flight operation future was dropped and
    /// left the busy window open.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Returns the chain the wallet must be on for the current step.
    pub fn expected_chain(&self) -> NamedChain {
        self.chains
            .expected_chain(self.session.direction(), self.session.step())
    }

    /// Observes the wallet identity and re-derives the messenger if it
    /// changed since the last observation.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::WalletNotConnected`] if no account is
    /// connected.
    pub async fn refresh(&mut self) -> Result<WalletIdentity> {
        let address = self
            .wallet
            .address()
            .await?
            .ok_or(BridgeError::WalletNotConnected)?;
        let chain_id = self.wallet.chain_id().await?;
        let identity = WalletIdentity { address, chain_id };

        let stale = match &self.context {
            Some((current, _)) => *current != identity,
            None => true,
        };
        if stale {
            debug!(
                address = %identity.address,
                chain_id = identity.chain_id,
                event = "messenger_derived"
            );
            let messenger = self.messenger_factory.create(&identity);
            self.context = Some((identity, messenger));
        }
        Ok(identity)
    }

    /// Returns the control the render surface should currently offer:
    /// a network switch when the wallet is on the wrong chain, otherwise
    /// the step's action.
    pub async fn action(&mut self) -> Result<Action> {
        let identity = self.refresh().await?;
        let expected = self.expected_chain();
        if identity.chain_id != expected as ChainId {
            return Ok(Action::SwitchNetwork { target: expected });
        }
        Ok(Action::Bridge(self.session.action()))
    }

    /// Asks the wallet to switch to the chain the current step expects.
    ///
    /// Performs no bridging action. On failure the session is untouched and
    /// the busy flag is never set; the error is reported to diagnostics.
    pub async fn switch_to_expected_chain(&mut self) -> Result<()> {
        let target = self.expected_chain();
        let span = spans::switch_chain(&target);
        let _guard = span.enter();

        if let Err(e) = self.wallet.switch_chain(target as ChainId).await {
            spans::record_error(&e);
            error!(target_chain = %target, error = %e, event = "chain_switch_failed");
            return Err(e);
        }
        info!(target_chain = %target, event = "chain_switched");
        self.refresh().await?;
        Ok(())
    }

    /// Performs the action for the current (direction, step) position.
    ///
    /// Routing per the state table:
    ///
    /// | Direction | Step | Effect on success                       | Next step |
    /// |-----------|------|-----------------------------------------|-----------|
    /// | L1 to L2  | 0    | deposit, await L1 conf and L2 receipt   | 1         |
    /// | L1 to L2  | 1    | reset session                           | 0         |
    /// | L2 to L1  | 0    | withdraw, await ready-to-prove          | 1         |
    /// | L2 to L1  | 1    | prove, await relay window, finalize     | 2         |
    /// | L2 to L1  | 2    | reset session                           | 0         |
    ///
    /// # Errors
    ///
    /// Rejected without side effects if an operation is already in flight,
    /// the wallet is on the wrong chain, or the amount input does not parse.
    /// Messenger failures terminate the attempt with the step unchanged so
    /// the same action can be retried.
    pub async fn handle_action(&mut self) -> Result<()> {
        if self.session.is_busy() {
            return Err(BridgeError::OperationInFlight);
        }

        let identity = self.refresh().await?;
        let expected = self.expected_chain();
        if identity.chain_id != expected as ChainId {
            return Err(BridgeError::WrongChain {
                expected: expected as ChainId,
                actual: identity.chain_id,
            });
        }

        match self.session.action() {
            ActionKind::Deposit => self.deposit().await,
            ActionKind::Withdraw => self.withdraw().await,
            ActionKind::ProveAndFinalize => self.prove_and_finalize().await,
            ActionKind::Restart => {
                info!(event = "session_reset");
                self.session.reset();
                Ok(())
            }
        }
    }

    fn messenger(&self) -> Result<F::Messenger> {
        self.context
            .as_ref()
            .map(|(_, messenger)| messenger.clone())
            .ok_or(BridgeError::WalletNotConnected)
    }

    async fn deposit(&mut self) -> Result<()> {
        let amount = parse_eth_amount(self.session.amount())?;
        let messenger = self.messenger()?;
        let span = spans::deposit(&amount, &self.chains.l1(), &self.chains.l2());
        let _guard = span.enter();

        self.session.set_busy(true);
        let result = self.run_deposit(&messenger, amount).await;
        self.session.set_busy(false);

        if let Err(e) = &result {
            spans::record_error(e);
            error!(error = %e, event = "deposit_failed");
        }
        result
    }

    async fn run_deposit(&mut self, messenger: &F::Messenger, amount: U256) -> Result<()> {
        let submitted = messenger.deposit_eth(amount).await?;
        self.session.set_l1_tx(submitted.hash);
        info!(tx_hash = %submitted.hash, event = "deposit_submitted");
        self.session.push_log(LogEntry::linked(
            "Transaction submitted, waiting for confirmation...",
            self.chains.l1().tx_url(submitted.hash)?,
        ));

        messenger.wait_for_confirmation(submitted.hash).await?;
        info!(tx_hash = %submitted.hash, event = "deposit_confirmed");

        let l2_block = messenger.l2_block_number().await?;
        let wait_secs = messenger
            .estimate_wait_time_secs(submitted.hash, TransferDirection::L1ToL2, l2_block)
            .await?;
        info!(
            estimated_wait_secs = wait_secs,
            from_block = l2_block,
            event = "relay_wait_estimated"
        );

        let receipt = messenger
            .wait_for_message_receipt(submitted.hash, l2_block)
            .await?;
        self.session.set_l2_tx(receipt.tx_hash);
        self.session.push_log(LogEntry::linked(
            "Transaction complete!",
            self.chains.l2().tx_url(receipt.tx_hash)?,
        ));
        self.session.advance_step();
        info!(l2_tx_hash = %receipt.tx_hash, event = "deposit_complete");
        Ok(())
    }

    async fn withdraw(&mut self) -> Result<()> {
        let amount = parse_eth_amount(self.session.amount())?;
        let messenger = self.messenger()?;
        let span = spans::withdraw(&amount, &self.chains.l1(), &self.chains.l2());
        let _guard = span.enter();

        self.session.set_busy(true);
        let result = self.run_withdraw(&messenger, amount).await;
        self.session.set_busy(false);

        if let Err(e) = &result {
            spans::record_error(e);
            error!(error = %e, event = "withdraw_failed");
        }
        result
    }

    async fn run_withdraw(&mut self, messenger: &F::Messenger, amount: U256) -> Result<()> {
        let submitted = messenger.withdraw_eth(amount).await?;
        self.session.set_l2_tx(submitted.hash);
        info!(tx_hash = %submitted.hash, event = "withdrawal_submitted");
        self.session.push_log(LogEntry::linked(
            "Transaction submitted, waiting for confirmation...",
            self.chains.l2().tx_url(submitted.hash)?,
        ));

        messenger
            .wait_for_message_status(submitted.hash, MessageStatus::ReadyToProve, self.polling)
            .await?;
        self.session
            .push_log(LogEntry::text("Transaction ready to prove..."));
        self.session.advance_step();
        info!(tx_hash = %submitted.hash, event = "withdrawal_ready_to_prove");
        Ok(())
    }

    async fn prove_and_finalize(&mut self) -> Result<()> {
        let withdrawal = self.session.l2_tx().ok_or(BridgeError::MissingWithdrawal)?;
        let messenger = self.messenger()?;
        let span = spans::prove_and_finalize(withdrawal, &self.chains.l1());
        let _guard = span.enter();

        self.session.set_busy(true);
        let result = self.run_prove_and_finalize(&messenger, withdrawal).await;
        self.session.set_busy(false);

        if let Err(e) = &result {
            spans::record_error(e);
            error!(error = %e, event = "prove_and_finalize_failed");
        }
        result
    }

    async fn run_prove_and_finalize(
        &mut self,
        messenger: &F::Messenger,
        withdrawal: TxHash,
    ) -> Result<()> {
        let proof = messenger.prove_message(withdrawal).await?;
        info!(
            withdrawal_tx = %withdrawal,
            proof_tx = %proof.hash,
            event = "withdrawal_proved"
        );

        messenger
            .wait_for_message_status(withdrawal, MessageStatus::ReadyForRelay, self.polling)
            .await?;
        self.session
            .push_log(LogEntry::text("Transaction ready to relay..."));

        let finalize = messenger.finalize_message(withdrawal).await?;
        self.session.set_l1_tx(finalize.hash);
        info!(tx_hash = %finalize.hash, event = "finalize_submitted");
        self.session.push_log(LogEntry::linked(
            "Transaction submitted, waiting for confirmation...",
            self.chains.l1().tx_url(finalize.hash)?,
        ));

        messenger
            .wait_for_message_status(withdrawal, MessageStatus::Relayed, self.polling)
            .await?;
        self.session.push_log(LogEntry::linked(
            "Transaction complete!",
            self.chains.l1().tx_url(finalize.hash)?,
        ));
        self.session.advance_step();
        info!(withdrawal_tx = %withdrawal, event = "withdrawal_relayed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeMessenger, FakeMessengerFactory, FakeWallet};
    use alloy_primitives::{address, Address, TxHash};

    const USER: Address = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
    const SEPOLIA_ID: ChainId = NamedChain::Sepolia as ChainId;

    fn controller(
        wallet: FakeWallet,
        messenger: FakeMessenger,
    ) -> BridgeController<FakeWallet, FakeMessengerFactory> {
        BridgeController::builder()
            .wallet(wallet)
            .messenger_factory(FakeMessengerFactory::new(messenger))
            .chains(ChainPair::sepolia_base())
            .polling(PollingConfig::devnet())
            .build()
    }

    #[tokio::test]
    async fn test_action_rejected_while_busy() {
        let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
        let mut controller = controller(wallet, FakeMessenger::new());
        controller.session.set_busy(true);

        let result = controller.handle_action().await;
        assert!(matches!(
            result.unwrap_err(),
            BridgeError::OperationInFlight
        ));
        assert_eq!(controller.session().step(), 0);
        assert!(controller.session().logs().is_empty());
    }

    #[tokio::test]
    async fn test_prove_without_recorded_withdrawal() {
        let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
        let mut controller = controller(wallet, FakeMessenger::new());
        // L2_TO_L1 at step 1 with no withdrawal hash recorded
        controller.session.flip_networks().unwrap();
        controller.session.advance_step();

        let result = controller.handle_action().await;
        assert!(matches!(
            result.unwrap_err(),
            BridgeError::MissingWithdrawal
        ));
        assert!(!controller.session().is_busy());
    }

    #[tokio::test]
    async fn test_restart_resets_session() {
        let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
        let mut controller = controller(wallet, FakeMessenger::new());
        // Drive the session to the L1_TO_L2 terminal step by hand
        controller.session.advance_step();
        controller.session.set_l1_tx(TxHash::from([1u8; 32]));
        controller
            .session
            .push_log(LogEntry::text("Transaction complete!"));
        assert!(controller.session().is_terminal());

        controller.handle_action().await.unwrap();

        assert_eq!(controller.session().step(), 0);
        assert!(controller.session().logs().is_empty());
        assert_eq!(controller.session().l1_tx(), None);
    }
}
