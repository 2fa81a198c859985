use alloy_chains::NamedChain;
use alloy_primitives::{ChainId, TxHash};
use url::Url;

use super::explorers::{
    BASE_EXPLORER, BASE_SEPOLIA_EXPLORER, ETHEREUM_EXPLORER, ETHEREUM_SEPOLIA_EXPLORER,
    OPTIMISM_EXPLORER, OPTIMISM_SEPOLIA_EXPLORER,
};
use crate::error::{BridgeError, Result};
use crate::protocol::TransferDirection;

/// Chain configuration trait for networks this bridge can link.
///
/// Implemented on `alloy_chains::NamedChain` to provide the block explorer
/// lookups used when rendering transaction links in the session log feed.
pub trait BridgedChain {
    /// Returns the block explorer base URL for this chain
    ///
    /// Returns an error for chains the bridge does not support.
    fn explorer_url(&self) -> Result<Url>;

    /// Returns the explorer page for a transaction on this chain
    fn tx_url(&self, tx_hash: TxHash) -> Result<Url> {
        self.explorer_url()?
            .join(&format!("tx/{tx_hash}"))
            .map_err(|e| BridgeError::InvalidUrl {
                reason: format!("Failed to construct explorer URL: {e}"),
            })
    }
}

impl BridgedChain for NamedChain {
    fn explorer_url(&self) -> Result<Url> {
        let base = match self {
            Self::Mainnet => ETHEREUM_EXPLORER,
            Self::Sepolia => ETHEREUM_SEPOLIA_EXPLORER,
            Self::Optimism => OPTIMISM_EXPLORER,
            Self::OptimismSepolia => OPTIMISM_SEPOLIA_EXPLORER,
            Self::Base => BASE_EXPLORER,
            Self::BaseSepolia => BASE_SEPOLIA_EXPLORER,
            _ => {
                return Err(BridgeError::UnsupportedChain {
                    chain: self.to_string(),
                })
            }
        };
        // Known-good constants
        Ok(Url::parse(base).unwrap())
    }
}

/// An L1 and the OP Stack L2 that settles to it.
///
/// Only pairs where the L2 actually posts its output roots to the given L1
/// are accepted; bridging against any other combination would stall at the
/// prove step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainPair {
    l1: NamedChain,
    l2: NamedChain,
}

/// OP Stack settlement pairs this bridge supports.
const SUPPORTED_PAIRS: &[(NamedChain, NamedChain)] = &[
    (NamedChain::Mainnet, NamedChain::Optimism),
    (NamedChain::Mainnet, NamedChain::Base),
    (NamedChain::Sepolia, NamedChain::OptimismSepolia),
    (NamedChain::Sepolia, NamedChain::BaseSepolia),
];

impl ChainPair {
    /// Creates a pair after checking it against the supported settlement table.
    pub fn new(l1: NamedChain, l2: NamedChain) -> Result<Self> {
        if SUPPORTED_PAIRS.contains(&(l1, l2)) {
            Ok(Self { l1, l2 })
        } else {
            Err(BridgeError::UnsupportedChainPair {
                l1: l1.to_string(),
                l2: l2.to_string(),
            })
        }
    }

    /// Sepolia settling Base Sepolia, the default testnet deployment.
    pub fn sepolia_base() -> Self {
        Self {
            l1: NamedChain::Sepolia,
            l2: NamedChain::BaseSepolia,
        }
    }

    /// Mainnet settling Base.
    pub fn mainnet_base() -> Self {
        Self {
            l1: NamedChain::Mainnet,
            l2: NamedChain::Base,
        }
    }

    /// Returns the L1 chain
    pub fn l1(&self) -> NamedChain {
        self.l1
    }

    /// Returns the L2 chain
    pub fn l2(&self) -> NamedChain {
        self.l2
    }

    /// Returns the source chain for a transfer direction
    pub fn source(&self, direction: TransferDirection) -> NamedChain {
        match direction {
            TransferDirection::L1ToL2 => self.l1,
            TransferDirection::L2ToL1 => self.l2,
        }
    }

    /// Returns the destination chain for a transfer direction
    pub fn destination(&self, direction: TransferDirection) -> NamedChain {
        self.source(direction.flipped())
    }

    /// Returns the chain the wallet must be on for a given (direction, step).
    ///
    /// Deposits always act on L1. Withdrawals act on L2 for the initial
    /// submission (step 0) and on L1 from the prove-and-finalize step on,
    /// terminal step included.
    pub fn expected_chain(&self, direction: TransferDirection, step: u8) -> NamedChain {
        match direction {
            TransferDirection::L1ToL2 => self.l1,
            TransferDirection::L2ToL1 => {
                if step == 0 {
                    self.l2
                } else {
                    self.l1
                }
            }
        }
    }

    /// Chain id form of [`expected_chain`](Self::expected_chain)
    pub fn expected_chain_id(&self, direction: TransferDirection, step: u8) -> ChainId {
        self.expected_chain(direction, step) as ChainId
    }
}

impl Default for ChainPair {
    fn default() -> Self {
        Self::sepolia_base()
    }
}
