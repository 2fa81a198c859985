use thiserror::Error;

use crate::protocol::MessageStatus;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("Chain not supported: {chain}")]
    UnsupportedChain { chain: String },

    #[error("Unsupported bridge pair: {l1} / {l2}")]
    UnsupportedChainPair { l1: String, l2: String },

    #[error("Wrong active chain: expected chain id {expected}, wallet is on {actual}")]
    WrongChain { expected: u64, actual: u64 },

    #[error("A bridging operation is already in flight for this session")]
    OperationInFlight,

    #[error("Invalid amount {input:?}: {source}")]
    InvalidAmount {
        input: String,
        #[source]
        source: alloy_primitives::utils::UnitsError,
    },

    #[error("Amount must not be negative: {input:?}")]
    NegativeAmount { input: String },

    #[error("No withdrawal transaction recorded for this session")]
    MissingWithdrawal,

    #[error("Messenger call failed: {0}")]
    Messenger(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Cross-chain message failed with status {status}")]
    MessageFailed { status: MessageStatus },

    #[error("Timed out waiting for message status {target} after {waited_secs} seconds")]
    StatusTimeout {
        target: MessageStatus,
        waited_secs: u64,
    },

    #[error("Chain switch failed: {reason}")]
    SwitchChainFailed { reason: String },

    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
