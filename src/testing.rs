//! Test utilities and fake implementations of the collaborator traits
//!
//! These fakes let tests drive the bridge step controller through full
//! deposit and withdrawal flows, including adversarial scenarios (rejected
//! submissions, stuck message statuses, refused chain switches), without a
//! browser wallet or live chains.
//!
//! They are used by this crate's integration tests and are exported for
//! downstream crates that embed the controller.

use alloy_primitives::{Address, ChainId, TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::{BridgeError, Result};
use crate::protocol::{
    MessageReceipt, MessageStatus, SubmittedTransaction, TransferDirection, WalletIdentity,
};
use crate::traits::{CrossChainMessenger, MessengerFactory, WalletProvider};

// ============================================================================
// Fake Wallet
// ============================================================================

/// A fake wallet with a scripted account and active chain.
///
/// This allows testing scenarios like:
/// - No wallet connected
/// - Wallet on the wrong chain for the current step
/// - User rejecting a chain-switch request
/// - Account or chain changing between operations
#[derive(Clone, Debug, Default)]
pub struct FakeWallet {
    address: Arc<Mutex<Option<Address>>>,
    chain_id: Arc<Mutex<ChainId>>,
    reject_switch: Arc<Mutex<bool>>,
    switch_log: Arc<Mutex<Vec<ChainId>>>,
}

impl FakeWallet {
    /// A wallet with a connected account on the given chain
    pub fn connected(address: Address, chain_id: ChainId) -> Self {
        let wallet = Self::default();
        *wallet.address.lock().unwrap() = Some(address);
        *wallet.chain_id.lock().unwrap() = chain_id;
        wallet
    }

    /// A wallet with no account connected
    pub fn disconnected(chain_id: ChainId) -> Self {
        let wallet = Self::default();
        *wallet.chain_id.lock().unwrap() = chain_id;
        wallet
    }

    /// Moves the wallet to another chain out of band
    pub fn set_chain_id(&self, chain_id: ChainId) {
        *self.chain_id.lock().unwrap() = chain_id;
    }

    /// Replaces the connected account out of band
    pub fn set_address(&self, address: Option<Address>) {
        *self.address.lock().unwrap() = address;
    }

    /// Makes every subsequent switch request fail as if the user rejected it
    pub fn reject_switches(&self) {
        *self.reject_switch.lock().unwrap() = true;
    }

    /// Chain ids that were requested through `switch_chain`, in order
    pub fn switch_requests(&self) -> Vec<ChainId> {
        self.switch_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn address(&self) -> Result<Option<Address>> {
        Ok(*self.address.lock().unwrap())
    }

    async fn chain_id(&self) -> Result<ChainId> {
        Ok(*self.chain_id.lock().unwrap())
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<()> {
        self.switch_log.lock().unwrap().push(chain_id);
        if *self.reject_switch.lock().unwrap() {
            return Err(BridgeError::SwitchChainFailed {
                reason: "Simulated user rejection".to_string(),
            });
        }
        *self.chain_id.lock().unwrap() = chain_id;
        Ok(())
    }
}

// ============================================================================
// Fake Messenger
// ============================================================================

#[derive(Debug)]
struct FakeMessengerState {
    submissions: VecDeque<std::result::Result<TxHash, String>>,
    confirmation_failures: Vec<TxHash>,
    receipts: HashMap<TxHash, MessageReceipt>,
    statuses: HashMap<TxHash, Vec<MessageStatus>>,
    status_index: HashMap<TxHash, usize>,
    l2_block: u64,
    wait_estimate_secs: u64,
    submit_calls: usize,
}

impl Default for FakeMessengerState {
    fn default() -> Self {
        Self {
            submissions: VecDeque::new(),
            confirmation_failures: Vec::new(),
            receipts: HashMap::new(),
            statuses: HashMap::new(),
            status_index: HashMap::new(),
            l2_block: 12345,
            wait_estimate_secs: 90,
            submit_calls: 0,
        }
    }
}

/// A fake messenger with scripted submissions, receipts, and status
/// progressions.
///
/// Submission results (deposit, withdraw, prove, finalize) are consumed
/// from a single queue in call order. Message statuses progress through a
/// per-hash sequence, repeating the last element once exhausted, which
/// mirrors how a real message eventually settles into one status.
#[derive(Clone, Debug, Default)]
pub struct FakeMessenger {
    state: Arc<Mutex<FakeMessengerState>>,
}

impl FakeMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next submission to succeed with the given hash
    pub fn push_submission(&self, tx_hash: TxHash) {
        self.state.lock().unwrap().submissions.push_back(Ok(tx_hash));
    }

    /// Scripts the next submission to fail with the given reason
    pub fn push_submission_failure(&self, reason: &str) {
        self.state
            .lock()
            .unwrap()
            .submissions
            .push_back(Err(reason.to_string()));
    }

    /// Makes `wait_for_confirmation` fail for the given hash
    pub fn fail_confirmation(&self, tx_hash: TxHash) {
        self.state
            .lock()
            .unwrap()
            .confirmation_failures
            .push(tx_hash);
    }

    /// Adds a destination-chain receipt for a message
    pub fn add_receipt(&self, tx_hash: TxHash, receipt: MessageReceipt) {
        self.state.lock().unwrap().receipts.insert(tx_hash, receipt);
    }

    /// Scripts the status progression for a message hash.
    ///
    /// Each `message_status` call returns the next element; the last one
    /// repeats once the sequence is exhausted.
    pub fn add_status_sequence(&self, tx_hash: TxHash, statuses: Vec<MessageStatus>) {
        let mut state = self.state.lock().unwrap();
        state.statuses.insert(tx_hash, statuses);
        state.status_index.insert(tx_hash, 0);
    }

    /// Sets the L2 block number reported to callers
    pub fn set_l2_block(&self, block: u64) {
        self.state.lock().unwrap().l2_block = block;
    }

    /// Number of `message_status` calls made for a hash
    pub fn status_calls(&self, tx_hash: TxHash) -> usize {
        self.state
            .lock()
            .unwrap()
            .status_index
            .get(&tx_hash)
            .copied()
            .unwrap_or(0)
    }

    /// Total submissions issued (deposit, withdraw, prove, finalize)
    pub fn submit_calls(&self) -> usize {
        self.state.lock().unwrap().submit_calls
    }

    fn next_submission(&self) -> Result<SubmittedTransaction> {
        let mut state = self.state.lock().unwrap();
        state.submit_calls += 1;
        match state.submissions.pop_front() {
            Some(Ok(hash)) => Ok(SubmittedTransaction { hash }),
            Some(Err(reason)) => Err(BridgeError::Messenger(reason)),
            None => Err(BridgeError::Messenger(
                "no scripted submission".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CrossChainMessenger for FakeMessenger {
    async fn deposit_eth(&self, _amount: U256) -> Result<SubmittedTransaction> {
        self.next_submission()
    }

    async fn withdraw_eth(&self, _amount: U256) -> Result<SubmittedTransaction> {
        self.next_submission()
    }

    async fn prove_message(&self, _tx_hash: TxHash) -> Result<SubmittedTransaction> {
        self.next_submission()
    }

    async fn finalize_message(&self, _tx_hash: TxHash) -> Result<SubmittedTransaction> {
        self.next_submission()
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()> {
        if self
            .state
            .lock()
            .unwrap()
            .confirmation_failures
            .contains(&tx_hash)
        {
            return Err(BridgeError::Messenger(
                "Simulated reverted transaction".to_string(),
            ));
        }
        Ok(())
    }

    async fn l2_block_number(&self) -> Result<u64> {
        Ok(self.state.lock().unwrap().l2_block)
    }

    async fn wait_for_message_receipt(
        &self,
        tx_hash: TxHash,
        _from_block: u64,
    ) -> Result<MessageReceipt> {
        self.state
            .lock()
            .unwrap()
            .receipts
            .get(&tx_hash)
            .copied()
            .ok_or_else(|| BridgeError::Messenger("no scripted receipt".to_string()))
    }

    async fn message_status(&self, tx_hash: TxHash) -> Result<MessageStatus> {
        let mut state = self.state.lock().unwrap();
        let Some(sequence) = state.statuses.get(&tx_hash) else {
            return Err(BridgeError::Messenger("no scripted status".to_string()));
        };
        let index = state.status_index.get(&tx_hash).copied().unwrap_or(0);
        let status = sequence
            .get(index)
            .or_else(|| sequence.last())
            .copied()
            .ok_or_else(|| BridgeError::Messenger("empty status sequence".to_string()))?;
        state.status_index.insert(tx_hash, index + 1);
        Ok(status)
    }

    async fn estimate_wait_time_secs(
        &self,
        _tx_hash: TxHash,
        _direction: TransferDirection,
        _from_block: u64,
    ) -> Result<u64> {
        Ok(self.state.lock().unwrap().wait_estimate_secs)
    }
}

// ============================================================================
// Fake Messenger Factory
// ============================================================================

/// A factory handing out clones of one shared-state [`FakeMessenger`],
/// recording every identity a messenger was derived for.
#[derive(Clone, Debug)]
pub struct FakeMessengerFactory {
    messenger: FakeMessenger,
    created: Arc<Mutex<Vec<WalletIdentity>>>,
}

impl FakeMessengerFactory {
    pub fn new(messenger: FakeMessenger) -> Self {
        Self {
            messenger,
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Identities messengers were derived for, in order
    pub fn created_identities(&self) -> Vec<WalletIdentity> {
        self.created.lock().unwrap().clone()
    }

    /// Number of messengers derived
    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

impl MessengerFactory for FakeMessengerFactory {
    type Messenger = FakeMessenger;

    fn create(&self, identity: &WalletIdentity) -> FakeMessenger {
        self.created.lock().unwrap().push(*identity);
        self.messenger.clone()
    }
}
