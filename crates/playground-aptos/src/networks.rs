use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::Url;

/// Well-known Aptos networks the playground can target.
///
/// Each network carries default fullnode and faucet endpoints; both can be
/// overridden in configuration. Mainnet has no faucet.
///
/// ```
/// use playground_aptos::AptosNetwork;
///
/// let network: AptosNetwork = "Devnet".parse().unwrap();
/// assert_eq!(network.node_url().as_str(), "https://fullnode.devnet.aptoslabs.com/v1");
/// assert!(AptosNetwork::Mainnet.faucet_url().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AptosNetwork {
    Mainnet,
    Testnet,
    #[default]
    Devnet,
    Local,
}

impl AptosNetwork {
    pub fn variants() -> &'static [AptosNetwork] {
        &[
            AptosNetwork::Mainnet,
            AptosNetwork::Testnet,
            AptosNetwork::Devnet,
            AptosNetwork::Local,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AptosNetwork::Mainnet => "mainnet",
            AptosNetwork::Testnet => "testnet",
            AptosNetwork::Devnet => "devnet",
            AptosNetwork::Local => "local",
        }
    }

    /// Default fullnode REST endpoint.
    pub fn node_url(&self) -> Url {
        let url = match self {
            AptosNetwork::Local => "http://127.0.0.1:8080/v1".to_string(),
            network => format!("https://fullnode.{}.aptoslabs.com/v1", network.as_str()),
        };
        Url::parse(&url).expect("well-known node URL")
    }

    /// Default faucet endpoint, if the network has one.
    pub fn faucet_url(&self) -> Option<Url> {
        let url = match self {
            AptosNetwork::Mainnet => return None,
            AptosNetwork::Local => "http://127.0.0.1:8081".to_string(),
            network => format!("https://faucet.{}.aptoslabs.com", network.as_str()),
        };
        Some(Url::parse(&url).expect("well-known faucet URL"))
    }
}

impl Display for AptosNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown Aptos network {0}, expected one of mainnet, testnet, devnet, local")]
pub struct UnknownNetworkError(String);

impl FromStr for AptosNetwork {
    type Err = UnknownNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.trim().to_ascii_lowercase();
        AptosNetwork::variants()
            .iter()
            .find(|network| network.as_str() == lowercase)
            .copied()
            .ok_or_else(|| UnknownNetworkError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("TESTNET".parse::<AptosNetwork>().unwrap(), AptosNetwork::Testnet);
        assert_eq!(" local ".parse::<AptosNetwork>().unwrap(), AptosNetwork::Local);
        assert!("betanet".parse::<AptosNetwork>().is_err());
    }

    #[test]
    fn default_endpoints() {
        assert_eq!(
            AptosNetwork::Testnet.faucet_url().unwrap().as_str(),
            "https://faucet.testnet.aptoslabs.com/"
        );
        assert_eq!(
            AptosNetwork::Local.node_url().as_str(),
            "http://127.0.0.1:8080/v1"
        );
        assert_eq!(AptosNetwork::default(), AptosNetwork::Devnet);
    }
}
