use aptos_crypto::SigningKey;
use aptos_rest_client::Client as AptosClient;
use aptos_types::chain_id::ChainId;
use aptos_types::transaction::{RawTransaction, SignedTransaction};
use move_core_types::account_address::AccountAddress;
use playground_types::error::ApiError;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::chain::account::AptosAccount;
use crate::chain::config::AptosChainConfig;
use crate::chain::faucet::{FaucetClient, FaucetError};
use crate::chain::transaction::EntryFunctionCall;
use crate::chain::types::Address;
use crate::networks::AptosNetwork;

#[derive(thiserror::Error, Debug)]
pub enum AptosProviderError {
    #[error("Faucet is not available on {0}")]
    FaucetUnavailable(AptosNetwork),
    #[error(transparent)]
    Faucet(#[from] FaucetError),
    /// Failure reported by the fullnode REST API, message kept as-is.
    #[error("{0}")]
    Rest(String),
    #[error("{0}")]
    InvalidCall(String),
    #[error("Failed to sign transaction: {0}")]
    Signing(String),
    #[error("BCS serialization error: {0}")]
    Bcs(#[from] bcs::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("System clock error: {0}")]
    Clock(String),
}

impl From<AptosProviderError> for ApiError {
    fn from(value: AptosProviderError) -> Self {
        ApiError::Upstream(value.to_string())
    }
}

/// Operations the account gateway needs from the chain.
///
/// The real implementation is [`AptosChainProvider`]; tests substitute a stub
/// that records the calls it receives.
#[async_trait::async_trait]
pub trait AptosProviderOps: Send + Sync {
    /// Requests the faucet to credit `amount` octas to `address`, returning its response.
    async fn fund_account(
        &self,
        address: &Address,
        amount: u64,
    ) -> Result<serde_json::Value, AptosProviderError>;

    /// Builds, signs and submits a single entry-function transaction, returning
    /// the committed transaction record.
    async fn submit_entry_function(
        &self,
        sender: &AptosAccount,
        call: &EntryFunctionCall,
    ) -> Result<serde_json::Value, AptosProviderError>;
}

/// Transaction parameters applied to every submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasOptions {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_secs: u64,
}

impl Default for GasOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 200_000,
            gas_unit_price: 100,
            expiration_secs: 20,
        }
    }
}

pub struct AptosChainProvider {
    network: AptosNetwork,
    rest_client: Arc<AptosClient>,
    faucet: Option<FaucetClient>,
    gas: GasOptions,
}

impl Debug for AptosChainProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AptosChainProvider")
            .field("network", &self.network)
            .field("rest_client", &"<rest_client>")
            .field("faucet", &self.faucet.as_ref().map(FaucetClient::base_url))
            .field("gas", &self.gas)
            .finish()
    }
}

impl AptosChainProvider {
    pub fn from_config(config: &AptosChainConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let node_url = config.node_url();
        let faucet = config.faucet_url().map(FaucetClient::try_new).transpose()?;
        let rest_client = AptosClient::new(node_url.clone());

        tracing::info!(
            network = %config.network(),
            node_url = %node_url,
            faucet_url = ?faucet.as_ref().map(|f| f.base_url().to_string()),
            "Initialized Aptos provider"
        );

        Ok(Self::new(config.network(), rest_client, faucet))
    }

    pub fn new(network: AptosNetwork, rest_client: AptosClient, faucet: Option<FaucetClient>) -> Self {
        Self {
            network,
            rest_client: Arc::new(rest_client),
            faucet,
            gas: GasOptions::default(),
        }
    }

    pub fn with_gas_options(mut self, gas: GasOptions) -> Self {
        self.gas = gas;
        self
    }

    pub fn rest_client(&self) -> &AptosClient {
        &self.rest_client
    }

    pub fn network(&self) -> AptosNetwork {
        self.network
    }

    async fn build_transaction(
        &self,
        sender: AccountAddress,
        call: &EntryFunctionCall,
    ) -> Result<RawTransaction, AptosProviderError> {
        let entry_function = call.to_entry_function()?;
        let chain_id = self
            .rest_client
            .get_ledger_information()
            .await
            .map_err(|e| AptosProviderError::Rest(e.to_string()))?
            .into_inner()
            .chain_id;
        let sequence_number = self
            .rest_client
            .get_account(sender)
            .await
            .map_err(|e| AptosProviderError::Rest(e.to_string()))?
            .into_inner()
            .sequence_number;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AptosProviderError::Clock(e.to_string()))?;
        Ok(RawTransaction::new_entry_function(
            sender,
            sequence_number,
            entry_function,
            self.gas.max_gas_amount,
            self.gas.gas_unit_price,
            now.as_secs() + self.gas.expiration_secs,
            ChainId::new(chain_id),
        ))
    }
}

#[async_trait::async_trait]
impl AptosProviderOps for AptosChainProvider {
    async fn fund_account(
        &self,
        address: &Address,
        amount: u64,
    ) -> Result<serde_json::Value, AptosProviderError> {
        let faucet = self
            .faucet
            .as_ref()
            .ok_or(AptosProviderError::FaucetUnavailable(self.network))?;
        let response = faucet.fund(address, amount).await?;
        Ok(response)
    }

    #[tracing::instrument(skip_all, fields(function = %call, sender = %sender.address()), err)]
    async fn submit_entry_function(
        &self,
        sender: &AptosAccount,
        call: &EntryFunctionCall,
    ) -> Result<serde_json::Value, AptosProviderError> {
        let raw_transaction = self.build_transaction(sender.address().into(), call).await?;
        let signature = sender
            .private_key()
            .sign(&raw_transaction)
            .map_err(|e| AptosProviderError::Signing(e.to_string()))?;
        let signed_transaction =
            SignedTransaction::new(raw_transaction, sender.public_key().clone(), signature);
        let committed = self
            .rest_client
            .submit_and_wait(&signed_transaction)
            .await
            .map_err(|e| AptosProviderError::Rest(e.to_string()))?
            .into_inner();
        tracing::info!(hash = %signed_transaction.committed_hash(), "Transaction committed");
        Ok(serde_json::to_value(committed)?)
    }
}
