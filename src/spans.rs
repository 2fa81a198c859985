//! OpenTelemetry span helpers for bridge operations
//!
//! Orthogonal span instrumentation: static span names, structured
//! attributes, and separation from the step-machine logic. These helpers
//! are used internally by [`BridgeController`](crate::BridgeController) but
//! are exposed for users who integrate with an existing OpenTelemetry setup.

use alloy_chains::NamedChain;
use alloy_primitives::{TxHash, U256};
use tracing::Span;

use crate::protocol::MessageStatus;

/// Create span for an ETH deposit (L1 to L2).
///
/// Parent: caller's operation span (auto-attached by tracing)
/// Children: messenger submission and wait spans
#[inline]
pub fn deposit(amount: &U256, l1_chain: &NamedChain, l2_chain: &NamedChain) -> Span {
    tracing::info_span!(
        "op_bridge.deposit",
        amount_wei = %amount,
        l1_chain = %l1_chain,
        l2_chain = %l2_chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for an ETH withdrawal submission (L2 to L1).
#[inline]
pub fn withdraw(amount: &U256, l1_chain: &NamedChain, l2_chain: &NamedChain) -> Span {
    tracing::info_span!(
        "op_bridge.withdraw",
        amount_wei = %amount,
        l1_chain = %l1_chain,
        l2_chain = %l2_chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for the two-phase withdrawal completion (prove + finalize).
#[inline]
pub fn prove_and_finalize(withdrawal_tx: TxHash, l1_chain: &NamedChain) -> Span {
    tracing::info_span!(
        "op_bridge.prove_and_finalize",
        withdrawal_tx = %withdrawal_tx,
        l1_chain = %l1_chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for polling a message until it reaches a target status.
///
/// Parent: operation span (deposit, withdraw, prove_and_finalize)
/// Children: messenger status queries
#[inline]
pub fn wait_for_message_status(
    tx_hash: TxHash,
    target: MessageStatus,
    max_attempts: u32,
    poll_interval_secs: u64,
) -> Span {
    tracing::info_span!(
        "op_bridge.wait_for_message_status",
        tx_hash = %tx_hash,
        target = %target,
        max_attempts = max_attempts,
        poll_interval_secs = poll_interval_secs,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a wallet chain-switch request.
#[inline]
pub fn switch_chain(target_chain: &NamedChain) -> Span {
    tracing::debug_span!(
        "op_bridge.switch_chain",
        target_chain = %target_chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record failure attributes on the current span.
///
/// Fills the `error.*` fields every bridge span declares and flips
/// `otel.status_code` to `ERROR`. The error's display form supplies the
/// message, the text before its first `:` stands in for the type, and
/// the first link of the source chain lands in `error.source`.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = Span::current();
    let message = error.to_string();

    span.record("error.type", message.split(':').next().unwrap_or("Unknown"));
    span.record("error.message", message.as_str());
    if let Some(source) = error.source() {
        span.record("error.source", source.to_string());
    }
    span.record("otel.status_code", "ERROR");
}
