//! Block explorer base URLs for all supported chains
//!
//! These are used to build the transaction hyperlinks shown in the session
//! log feed. Trailing slashes matter: `tx/{hash}` is joined onto them.

/// <https://etherscan.io>
pub const ETHEREUM_EXPLORER: &str = "https://etherscan.io/";

/// <https://sepolia.etherscan.io>
pub const ETHEREUM_SEPOLIA_EXPLORER: &str = "https://sepolia.etherscan.io/";

/// <https://optimistic.etherscan.io>
pub const OPTIMISM_EXPLORER: &str = "https://optimistic.etherscan.io/";

/// <https://sepolia-optimism.etherscan.io>
pub const OPTIMISM_SEPOLIA_EXPLORER: &str = "https://sepolia-optimism.etherscan.io/";

/// <https://basescan.org>
pub const BASE_EXPLORER: &str = "https://basescan.org/";

/// <https://sepolia.basescan.org>
pub const BASE_SEPOLIA_EXPLORER: &str = "https://sepolia.basescan.org/";
