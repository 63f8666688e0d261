use aptos_crypto::ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
use aptos_types::transaction::authenticator::AuthenticationKey;
use playground_types::error::ApiError;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

use crate::chain::types::{Address, AptosPrivateKey};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

impl From<AccountError> for ApiError {
    fn from(value: AccountError) -> Self {
        ApiError::Upstream(value.to_string())
    }
}

/// Address and private key handed to the caller, who becomes their sole owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCredential {
    pub address: Address,
    pub private_key: AptosPrivateKey,
}

/// A single-key Ed25519 Aptos account able to sign transactions.
pub struct AptosAccount {
    seed: AptosPrivateKey,
    private_key: Ed25519PrivateKey,
    public_key: Ed25519PublicKey,
    address: Address,
}

impl Debug for AptosAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AptosAccount")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl AptosAccount {
    /// Generates a fresh account from 32 bytes of thread-local CSPRNG output.
    pub fn generate() -> Result<Self, AccountError> {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self::from_private_key(&AptosPrivateKey::from_bytes(seed))
    }

    /// Derives the account (public key, authentication key, address) for a private key.
    pub fn from_private_key(key: &AptosPrivateKey) -> Result<Self, AccountError> {
        let private_key = Ed25519PrivateKey::try_from(key.as_bytes().as_slice())
            .map_err(|e| AccountError::InvalidPrivateKey(e.to_string()))?;
        let public_key: Ed25519PublicKey = (&private_key).into();
        let auth_key = AuthenticationKey::ed25519(&public_key);
        let address = Address::new(auth_key.account_address());
        Ok(Self {
            seed: key.clone(),
            private_key,
            public_key,
            address,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn private_key(&self) -> &Ed25519PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    pub fn credential(&self) -> AccountCredential {
        AccountCredential {
            address: self.address,
            private_key: self.seed.clone(),
        }
    }
}
