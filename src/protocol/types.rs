use alloy_primitives::{Address, ChainId, TxHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a bridge transfer.
///
/// The direction is derived from which network the session currently treats
/// as the source. It is never set independently of the network selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferDirection {
    /// A deposit: L1 source, L2 destination
    L1ToL2,
    /// A withdrawal: L2 source, L1 destination
    L2ToL1,
}

impl TransferDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::L1ToL2 => Self::L2ToL1,
            Self::L2ToL1 => Self::L1ToL2,
        }
    }
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L1ToL2 => "L1_TO_L2",
            Self::L2ToL1 => "L2_TO_L1",
        };
        f.write_str(name)
    }
}

/// Handle returned by the messenger for a submitted transaction.
///
/// Confirmation is awaited separately through
/// [`CrossChainMessenger::wait_for_confirmation`](crate::CrossChainMessenger::wait_for_confirmation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmittedTransaction {
    /// Hash of the transaction on its submission chain
    pub hash: TxHash,
}

/// Receipt of a cross-chain message on its destination chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageReceipt {
    /// Hash of the relay transaction on the destination chain
    pub tx_hash: TxHash,
    /// Block the relay transaction was included in
    pub block_number: u64,
}

/// The wallet identity a derived messenger instance is bound to.
///
/// A messenger built for one identity must not be reused after the connected
/// address or active chain changes; the controller re-derives it through the
/// [`MessengerFactory`](crate::MessengerFactory) when the observed identity
/// differs from the cached one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalletIdentity {
    /// Connected account address
    pub address: Address,
    /// Chain id the wallet is currently on
    pub chain_id: ChainId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flip_is_involution() {
        assert_eq!(
            TransferDirection::L1ToL2.flipped(),
            TransferDirection::L2ToL1
        );
        assert_eq!(
            TransferDirection::L1ToL2.flipped().flipped(),
            TransferDirection::L1ToL2
        );
    }

    #[test]
    fn test_direction_serde_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransferDirection::L1ToL2).unwrap(),
            "\"L1_TO_L2\""
        );
        assert_eq!(
            serde_json::from_str::<TransferDirection>("\"L2_TO_L1\"").unwrap(),
            TransferDirection::L2ToL1
        );
    }
}
