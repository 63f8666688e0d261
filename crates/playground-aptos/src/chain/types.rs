use move_core_types::account_address::AccountAddress;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// An Aptos account address.
///
/// Wraps [`AccountAddress`] and serializes as the full `0x`-prefixed,
/// 64-hex-digit form.
///
/// ```
/// use playground_aptos::chain::Address;
/// use std::str::FromStr;
///
/// let addr = Address::from_str("0x1").unwrap();
/// assert_eq!(addr.to_string(), "0x0000000000000000000000000000000000000000000000000000000000000001");
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Address(AccountAddress);

impl Address {
    pub fn new(address: AccountAddress) -> Self {
        Self(address)
    }

    pub fn inner(&self) -> &AccountAddress {
        &self.0
    }
}

impl From<AccountAddress> for Address {
    fn from(address: AccountAddress) -> Self {
        Self(address)
    }
}

impl From<Address> for AccountAddress {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.0.to_hex())
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = AccountAddress::from_str(s.trim())
            .map_err(|e| format!("Invalid Aptos address {}: {}", s, e))?;
        Ok(Self(address))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// AIP-80 prefix some wallets and SDKs put in front of Ed25519 private keys.
const ED25519_PRIVATE_KEY_PREFIX: &str = "ed25519-priv-";

/// A hex-encoded Aptos Ed25519 private key as supplied by callers.
///
/// Accepts either:
/// - 32 bytes: Ed25519 seed
/// - 64 bytes: Full Ed25519 keypair (seed + public key); only the seed is kept
///
/// with an optional `0x` prefix and an optional AIP-80 `ed25519-priv-` prefix.
/// Always rendered as `0x`-prefixed hex of the 32-byte seed.
#[derive(Clone, PartialEq, Eq)]
pub struct AptosPrivateKey([u8; 32]);

impl AptosPrivateKey {
    pub fn from_bytes(seed: [u8; 32]) -> Self {
        Self(seed)
    }

    /// Parse a hex string into a private key.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix(ED25519_PRIVATE_KEY_PREFIX).unwrap_or(s);
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| format!("Invalid private key hex: {}", e))?;

        if bytes.len() != 32 && bytes.len() != 64 {
            return Err(format!(
                "Private key must be 32 or 64 bytes, got {} bytes",
                bytes.len()
            ));
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes[..32]);
        Ok(Self(seed))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl Debug for AptosPrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AptosPrivateKey(<redacted>)")
    }
}

impl FromStr for AptosPrivateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AptosPrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AptosPrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
