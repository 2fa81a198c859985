use alloy_primitives::TxHash;
use serde::Serialize;
use std::fmt;
use url::Url;

use crate::error::{BridgeError, Result};
use crate::protocol::TransferDirection;

/// Amount pre-filled in a fresh session, in ETH.
pub const DEFAULT_AMOUNT_ETH: &str = "0.001";

/// One display fragment in the session's log feed.
///
/// Entries are append-only for the lifetime of a session and optionally
/// carry a block-explorer hyperlink for the transaction they reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Url>,
}

impl LogEntry {
    pub(crate) fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            link: None,
        }
    }

    pub(crate) fn linked(message: impl Into<String>, link: Url) -> Self {
        Self {
            message: message.into(),
            link: Some(link),
        }
    }

    /// Returns the display text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the explorer hyperlink, if the entry references a transaction
    pub fn link(&self) -> Option<&Url> {
        self.link.as_ref()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link {
            Some(link) => write!(f, "{} ({link})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The action available at a given (direction, step) position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Submit an L1 deposit
    Deposit,
    /// Submit an L2 withdrawal
    Withdraw,
    /// Prove the withdrawal and finalize it on L1
    ProveAndFinalize,
    /// Terminal step: reset the session
    Restart,
}

impl ActionKind {
    /// The label the render surface puts on the action control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::ProveAndFinalize => "Prove & Finalize",
            Self::Restart => "Restart",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ephemeral state of one bridging session.
///
/// Holds everything the render surface shows: the transfer direction, the
/// current step, the amount input, the pending transaction hashes, the log
/// feed, and the busy flag that serializes bridging operations. Nothing
/// here is persisted; [`reset`](Self::reset) is the page-reload analogue
/// and the only way a step ever goes backwards.
///
/// Step semantics depend on direction:
/// - `L1_TO_L2`: 0 = awaiting deposit, 1 = complete (terminal)
/// - `L2_TO_L1`: 0 = awaiting withdraw, 1 = awaiting prove-and-finalize,
///   2 = complete (terminal)
#[derive(Clone, Debug)]
pub struct BridgeSession {
    direction: TransferDirection,
    step: u8,
    busy: bool,
    amount: String,
    l1_tx: Option<TxHash>,
    l2_tx: Option<TxHash>,
    logs: Vec<LogEntry>,
}

impl Default for BridgeSession {
    fn default() -> Self {
        Self {
            direction: TransferDirection::L1ToL2,
            step: 0,
            busy: false,
            amount: DEFAULT_AMOUNT_ETH.to_string(),
            l1_tx: None,
            l2_tx: None,
            logs: Vec::new(),
        }
    }
}

impl BridgeSession {
    /// Creates a fresh session: L1-to-L2, step 0, default amount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current transfer direction
    pub fn direction(&self) -> TransferDirection {
        self.direction
    }

    /// Returns the current step counter
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Returns true while a bridging operation is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the raw amount input text
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Returns the pending L1 transaction hash, if any
    pub fn l1_tx(&self) -> Option<TxHash> {
        self.l1_tx
    }

    /// Returns the pending L2 transaction hash, if any
    pub fn l2_tx(&self) -> Option<TxHash> {
        self.l2_tx
    }

    /// Returns the log feed, oldest entry first
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Returns the action for the current (direction, step) position.
    pub fn action(&self) -> ActionKind {
        match (self.direction, self.step) {
            (TransferDirection::L1ToL2, 0) => ActionKind::Deposit,
            (TransferDirection::L1ToL2, _) => ActionKind::Restart,
            (TransferDirection::L2ToL1, 0) => ActionKind::Withdraw,
            (TransferDirection::L2ToL1, 1) => ActionKind::ProveAndFinalize,
            (TransferDirection::L2ToL1, _) => ActionKind::Restart,
        }
    }

    /// Returns true once the flow has reached its terminal step.
    pub fn is_terminal(&self) -> bool {
        self.action() == ActionKind::Restart
    }

    /// Swaps the source and destination networks, toggling the direction.
    ///
    /// # Errors
    ///
    /// Rejected while an operation is in flight: the expected chain for the
    /// running step must not change under it.
    pub fn flip_networks(&mut self) -> Result<()> {
        if self.busy {
            return Err(BridgeError::OperationInFlight);
        }
        self.direction = self.direction.flipped();
        Ok(())
    }

    /// Replaces the amount input text.
    ///
    /// The text is validated at submission time, not here, so the field can
    /// hold whatever the user has typed so far.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    /// Returns every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    // Steps only ever move forward; reset() is the sole way back.
    pub(crate) fn advance_step(&mut self) {
        self.step += 1;
    }

    pub(crate) fn push_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
    }

    pub(crate) fn set_l1_tx(&mut self, tx_hash: TxHash) {
        self.l1_tx = Some(tx_hash);
    }

    pub(crate) fn set_l2_tx(&mut self, tx_hash: TxHash) {
        self.l2_tx = Some(tx_hash);
    }
}
