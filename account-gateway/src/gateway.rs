//! The account gateway service: one method per HTTP operation.

use playground_aptos::chain::{
    AccountCredential, Address, AptosAccount, AptosPrivateKey, AptosProviderOps, EntryArgument,
    EntryFunctionCall,
};
use playground_types::error::ApiError;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Name of the playground Move module under the configured module address.
pub const MODULE_NAME: &str = "main";

/// Translates account and transaction requests into chain calls.
///
/// Every transaction method derives the sender from the supplied private key and
/// submits exactly one entry-function call to `<module_address>::main`.
#[derive(Clone)]
pub struct AccountGateway {
    provider: Arc<dyn AptosProviderOps>,
    module_address: Address,
}

impl Debug for AccountGateway {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountGateway")
            .field("module_address", &self.module_address)
            .finish_non_exhaustive()
    }
}

impl AccountGateway {
    pub fn new(provider: Arc<dyn AptosProviderOps>, module_address: Address) -> Self {
        Self {
            provider,
            module_address,
        }
    }

    pub fn module_address(&self) -> Address {
        self.module_address
    }

    /// Creates a fresh keypair. Nothing is stored; the caller owns the key.
    pub fn generate_account(&self) -> Result<AccountCredential, ApiError> {
        let account = AptosAccount::generate()?;
        tracing::info!(address = %account.address(), "Generated account");
        Ok(account.credential())
    }

    pub async fn fund_account(&self, address: &Address, amount: u64) -> Result<Value, ApiError> {
        let response = self.provider.fund_account(address, amount).await?;
        Ok(response)
    }

    pub async fn init_module(&self, private_key: &AptosPrivateKey) -> Result<Value, ApiError> {
        self.submit(private_key, "init", vec![]).await
    }

    pub async fn hello(&self, private_key: &AptosPrivateKey) -> Result<Value, ApiError> {
        self.submit(private_key, "hello", vec![]).await
    }

    pub async fn mint_nft(
        &self,
        private_key: &AptosPrivateKey,
        uri: String,
    ) -> Result<Value, ApiError> {
        self.submit(private_key, "mint_nft", vec![EntryArgument::String(uri)])
            .await
    }

    pub async fn mint_token(
        &self,
        private_key: &AptosPrivateKey,
        amount: u64,
    ) -> Result<Value, ApiError> {
        self.submit(private_key, "mint_token", vec![EntryArgument::U64(amount)])
            .await
    }

    pub async fn transfer_token(
        &self,
        private_key: &AptosPrivateKey,
        recipient: Address,
        amount: u64,
    ) -> Result<Value, ApiError> {
        let args = vec![EntryArgument::Address(recipient), EntryArgument::U64(amount)];
        self.submit(private_key, "transfer_token", args).await
    }

    pub async fn transfer_nft(
        &self,
        private_key: &AptosPrivateKey,
        recipient: Address,
        token_id: u64,
    ) -> Result<Value, ApiError> {
        let args = vec![
            EntryArgument::Address(recipient),
            EntryArgument::U64(token_id),
        ];
        self.submit(private_key, "transfer_nft", args).await
    }

    async fn submit(
        &self,
        private_key: &AptosPrivateKey,
        function: &str,
        args: Vec<EntryArgument>,
    ) -> Result<Value, ApiError> {
        let sender = AptosAccount::from_private_key(private_key)?;
        let call = EntryFunctionCall::new(self.module_address, MODULE_NAME, function, args);
        let committed = self
            .provider
            .submit_entry_function(&sender, &call)
            .await
            .inspect_err(|error| {
                tracing::warn!(sender = %sender.address(), function = %call, %error, "Transaction failed")
            })?;
        Ok(committed)
    }
}
