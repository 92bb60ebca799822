//! Account and credential types shared by the import wizard and the address display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::Error;

/// Keypair type of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ed25519,
    Sr25519,
    Ecdsa,
    Ethereum,
}

/// Keypair type used when nothing more specific is known
pub const DEFAULT_TYPE: KeyType = KeyType::Sr25519;

/// Cesium (Ğ1v1) wallets are always ed25519
pub const CESIUM_KEY_TYPE: KeyType = KeyType::Ed25519;

/// Minimum length of the password protecting an imported account
pub const MIN_PASSWORD_LENGTH: usize = 6;

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "ed25519",
            KeyType::Sr25519 => "sr25519",
            KeyType::Ecdsa => "ecdsa",
            KeyType::Ethereum => "ethereum",
        }
    }

    pub fn is_ethereum(&self) -> bool {
        matches!(self, KeyType::Ethereum)
    }
}

impl Default for KeyType {
    fn default() -> Self {
        DEFAULT_TYPE
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(KeyType::Ed25519),
            "sr25519" => Ok(KeyType::Sr25519),
            "ecdsa" => Ok(KeyType::Ecdsa),
            "ethereum" => Ok(KeyType::Ethereum),
            other => Err(Error::Config(format!("Unknown key type: {}", other))),
        }
    }
}

/// Known account, as exposed by the wallet backend's account snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account address as stored by the backend
    pub address: String,
    /// Account display name
    #[serde(default)]
    pub name: Option<String>,
    /// Keypair type, if recorded
    #[serde(default, rename = "type")]
    pub key_type: Option<KeyType>,
    /// Chain the account is restricted to
    #[serde(default)]
    pub genesis_hash: Option<String>,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_hardware: bool,
    #[serde(default)]
    pub is_hidden: bool,
    /// Parent account address for derived accounts
    #[serde(default)]
    pub parent_address: Option<String>,
    /// Derivation path relative to the parent
    #[serde(default)]
    pub suri: Option<String>,
    #[serde(default)]
    pub when_created: Option<DateTime<Utc>>,
}

impl AccountRecord {
    /// Create a plain record for an address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, key_type: KeyType) -> Self {
        self.key_type = Some(key_type);
        self
    }

    pub fn with_genesis_hash(mut self, genesis_hash: impl Into<String>) -> Self {
        self.genesis_hash = Some(genesis_hash.into());
        self
    }
}

/// Cesium ID / password pair typed by the user
///
/// Both fields must be non-empty before a validation is attempted.
#[derive(Clone, Default, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct CredentialPair {
    pub id: Option<String>,
    pub password: Option<String>,
}

impl CredentialPair {
    /// Both fields present and non-empty
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (self.id.as_deref(), self.password.as_deref()) {
            (Some(id), Some(password)) if !id.is_empty() && !password.is_empty() => {
                Some((id, password))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("id", &self.id)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Result of a successful credential validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedAccount {
    /// Address derived from the credentials
    pub address: String,
}

/// Validated account handed from the credential step to the wizard
#[derive(Clone, PartialEq)]
pub struct AccountInfo {
    pub address: String,
    /// Selected network, empty for "any chain"
    pub genesis_hash: String,
    pub key_type: KeyType,
    /// Cesium wallet ID
    pub id: String,
    /// Cesium wallet password
    pub password: Zeroizing<String>,
}

impl AccountInfo {
    /// Augment a validation result with the form context it was obtained in
    pub fn from_validated(
        validated: ValidatedAccount,
        genesis_hash: &str,
        key_type: KeyType,
        id: &str,
        password: &str,
    ) -> Self {
        Self {
            address: validated.address,
            genesis_hash: genesis_hash.to_string(),
            key_type,
            id: id.to_string(),
            password: Zeroizing::new(password.to_string()),
        }
    }

    /// Genesis hash as an optional value, empty meaning unrestricted
    pub fn genesis(&self) -> Option<&str> {
        if self.genesis_hash.is_empty() {
            None
        } else {
            Some(&self.genesis_hash)
        }
    }
}

impl fmt::Debug for AccountInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountInfo")
            .field("address", &self.address)
            .field("genesis_hash", &self.genesis_hash)
            .field("key_type", &self.key_type)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Arguments of the account creation call
#[derive(Clone)]
pub struct CreateAccountRequest {
    pub name: String,
    /// Password protecting the new account in the extension
    pub password: Zeroizing<String>,
    pub id: String,
    /// Cesium wallet password
    pub wallet_password: Zeroizing<String>,
    pub key_type: KeyType,
    pub genesis_hash: Option<String>,
}

impl fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("key_type", &self.key_type)
            .field("genesis_hash", &self.genesis_hash)
            .finish_non_exhaustive()
    }
}
