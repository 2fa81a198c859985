use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a cross-chain message as tracked by the messenger service.
///
/// Deposits (L1 to L2) move from [`UnconfirmedL1ToL2Message`](Self::UnconfirmedL1ToL2Message)
/// to [`Relayed`](Self::Relayed), or dead-end at
/// [`FailedL1ToL2Message`](Self::FailedL1ToL2Message). Withdrawals (L2 to L1)
/// pass through the two-phase completion sequence: the state root must be
/// published before the message is [`ReadyToProve`](Self::ReadyToProve), and a
/// proven message sits in its challenge period until it becomes
/// [`ReadyForRelay`](Self::ReadyForRelay).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    /// Message sent on L1, not yet picked up on L2
    UnconfirmedL1ToL2Message,
    /// Relay of an L1-to-L2 message reverted on L2
    FailedL1ToL2Message,
    /// Withdrawal sent, output root not yet published to L1
    StateRootNotPublished,
    /// Output root published; the withdrawal proof can be submitted
    ReadyToProve,
    /// Proof submitted; the challenge period is running
    InChallengePeriod,
    /// Challenge period over; the message can be finalized on L1
    ReadyForRelay,
    /// Message executed on the destination chain
    Relayed,
}

impl MessageStatus {
    /// Returns true if this status means the message can never complete.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FailedL1ToL2Message)
    }

    /// Returns true if the message will not change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Relayed | Self::FailedL1ToL2Message)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnconfirmedL1ToL2Message => "UNCONFIRMED_L1_TO_L2_MESSAGE",
            Self::FailedL1ToL2Message => "FAILED_L1_TO_L2_MESSAGE",
            Self::StateRootNotPublished => "STATE_ROOT_NOT_PUBLISHED",
            Self::ReadyToProve => "READY_TO_PROVE",
            Self::InChallengePeriod => "IN_CHALLENGE_PERIOD",
            Self::ReadyForRelay => "READY_FOR_RELAY",
            Self::Relayed => "RELAYED",
        };
        f.write_str(name)
    }
}
