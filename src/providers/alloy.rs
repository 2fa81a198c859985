//! Wallet provider backed by an alloy JSON-RPC provider.

use alloy_network::Ethereum;
use alloy_primitives::{Address, ChainId};
use alloy_provider::Provider;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::traits::WalletProvider;

/// Production [`WalletProvider`] over any alloy [`Provider`].
///
/// Reads the connected account and active chain through standard JSON-RPC
/// (`eth_accounts`, `eth_chainId`) and requests chain switches via
/// `wallet_switchEthereumChain` (EIP-3326), which browser wallets and
/// wallet-backed RPC endpoints understand. Endpoints without wallet
/// extensions reject the switch, which surfaces as an RPC error.
///
/// # Examples
///
/// ```rust,no_run
/// use alloy_provider::ProviderBuilder;
/// use op_bridge::providers::AlloyWallet;
///
/// let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse().unwrap());
/// let wallet = AlloyWallet::new(provider);
/// ```
#[derive(Clone, Debug)]
pub struct AlloyWallet<P> {
    provider: P,
}

impl<P> AlloyWallet<P> {
    /// Wraps a provider as a wallet surface.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider<Ethereum> + Clone> WalletProvider for AlloyWallet<P> {
    async fn address(&self) -> Result<Option<Address>> {
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts.first().copied())
    }

    async fn chain_id(&self) -> Result<ChainId> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<()> {
        // EIP-695 hex-quantity encoding for the chain id param
        let params = json!([{ "chainId": format!("{chain_id:#x}") }]);
        debug!(chain_id = chain_id, event = "chain_switch_requested");
        let _resp: serde_json::Value = self
            .provider
            .raw_request("wallet_switchEthereumChain".into(), params)
            .await?;
        Ok(())
    }
}
