use playground_types::config::{LiteralOrEnv, config_defaults};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::chain::types::Address;
use crate::networks::AptosNetwork;

/// Aptos connection settings for the account gateway.
///
/// # Example
///
/// ```json
/// {
///   "network": "testnet",
///   "node_url": "$APTOS_NODE_URL",
///   "module_address": "$MODULE_ADDRESS"
/// }
/// ```
///
/// Fields the file omits fall back to `APTOS_NETWORK`, `APTOS_NODE_URL`,
/// `APTOS_FAUCET_URL` and `MODULE_ADDRESS`. Node and faucet URLs default to the
/// selected network's well-known endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AptosChainConfig {
    #[serde(default = "aptos_chain_config::default_network")]
    network: LiteralOrEnv<AptosNetwork>,
    #[serde(default = "aptos_chain_config::default_node_url")]
    node_url: Option<LiteralOrEnv<Url>>,
    #[serde(default = "aptos_chain_config::default_faucet_url")]
    faucet_url: Option<LiteralOrEnv<Url>>,
    /// Account that published the playground's `main` module.
    #[serde(default = "aptos_chain_config::default_module_address")]
    module_address: Option<LiteralOrEnv<Address>>,
}

mod aptos_chain_config {
    use super::*;

    pub fn default_network() -> LiteralOrEnv<AptosNetwork> {
        LiteralOrEnv::from_literal(config_defaults::env_parsed("APTOS_NETWORK").unwrap_or_default())
    }

    pub fn default_node_url() -> Option<LiteralOrEnv<Url>> {
        config_defaults::env_parsed("APTOS_NODE_URL").map(LiteralOrEnv::from_literal)
    }

    pub fn default_faucet_url() -> Option<LiteralOrEnv<Url>> {
        config_defaults::env_parsed("APTOS_FAUCET_URL").map(LiteralOrEnv::from_literal)
    }

    pub fn default_module_address() -> Option<LiteralOrEnv<Address>> {
        config_defaults::env_parsed("MODULE_ADDRESS").map(LiteralOrEnv::from_literal)
    }
}

impl Default for AptosChainConfig {
    fn default() -> Self {
        Self {
            network: aptos_chain_config::default_network(),
            node_url: aptos_chain_config::default_node_url(),
            faucet_url: aptos_chain_config::default_faucet_url(),
            module_address: aptos_chain_config::default_module_address(),
        }
    }
}

impl AptosChainConfig {
    pub fn new(network: AptosNetwork) -> Self {
        Self {
            network: LiteralOrEnv::from_literal(network),
            node_url: None,
            faucet_url: None,
            module_address: None,
        }
    }

    pub fn with_node_url(mut self, url: Url) -> Self {
        self.node_url = Some(LiteralOrEnv::from_literal(url));
        self
    }

    pub fn with_faucet_url(mut self, url: Url) -> Self {
        self.faucet_url = Some(LiteralOrEnv::from_literal(url));
        self
    }

    pub fn with_module_address(mut self, address: Address) -> Self {
        self.module_address = Some(LiteralOrEnv::from_literal(address));
        self
    }

    pub fn network(&self) -> AptosNetwork {
        *self.network.inner()
    }

    pub fn node_url(&self) -> Url {
        match &self.node_url {
            Some(url) => url.inner().clone(),
            None => self.network().node_url(),
        }
    }

    /// Explicit faucet URL, else the network's; `None` on mainnet without an override.
    pub fn faucet_url(&self) -> Option<Url> {
        match &self.faucet_url {
            Some(url) => Some(url.inner().clone()),
            None => self.network().faucet_url(),
        }
    }

    pub fn module_address(&self) -> Option<Address> {
        self.module_address.as_ref().map(|address| *address.inner())
    }
}
