//! Conversion of user-entered ETH amounts to wei.

use alloy_primitives::{
    utils::{parse_units, ParseUnits},
    U256,
};

use crate::error::{BridgeError, Result};

/// Parses a decimal ETH amount string into wei (18-decimal fixed point).
///
/// The input is the raw text of the amount field, so anything a user can
/// type must be handled here: empty, non-numeric, and negative inputs are
/// all rejected before any transaction is constructed. Parsing is exact
/// fixed-point arithmetic, so `"0.001"` is precisely `10^15` wei.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::U256;
/// use op_bridge::parse_eth_amount;
///
/// let wei = parse_eth_amount("0.001").unwrap();
/// assert_eq!(wei, U256::from(10).pow(U256::from(15)));
/// ```
pub fn parse_eth_amount(input: &str) -> Result<U256> {
    let parsed = parse_units(input.trim(), "ether").map_err(|source| BridgeError::InvalidAmount {
        input: input.to_string(),
        source,
    })?;
    match parsed {
        ParseUnits::U256(wei) => Ok(wei),
        ParseUnits::I256(_) => Err(BridgeError::NegativeAmount {
            input: input.to_string(),
        }),
    }
}
