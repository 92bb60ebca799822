//! In-memory wallet backend
//!
//! Derives Cesium (Ğ1v1) ed25519 keys from the ID/password pair and keeps created
//! accounts in memory for the lifetime of the process.

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use blake2::{digest::consts::U16, Blake2b, Digest};
use ed25519_dalek::SigningKey;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use crate::account::{
    AccountRecord, CreateAccountRequest, KeyType, ValidatedAccount, CESIUM_KEY_TYPE,
    MIN_PASSWORD_LENGTH,
};
use crate::codec::{decode_address, encode_address};
use crate::error::Error;
use crate::messaging::WalletApi;

// argon2id cost: 8 MiB, 2 passes, matching the memory footprint of Cesium's scrypt
const KDF_MEMORY_KIB: u32 = 8 * 1024;
const KDF_ITERATIONS: u32 = 2;
const KDF_PARALLELISM: u32 = 1;

/// Derive the Cesium wallet public key for an ID/password pair
pub fn derive_public_key(id: &str, password: &str) -> Result<[u8; 32], Error> {
    if id.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation("Invalid Cesium ID or password".to_string()));
    }

    let salt = Blake2b::<U16>::digest(id.as_bytes());
    let params = Params::new(KDF_MEMORY_KIB, KDF_ITERATIONS, KDF_PARALLELISM, Some(32))
        .map_err(|e| Error::Validation(format!("Invalid key derivation parameters: {}", e)))?;
    let kdf = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut seed = Zeroizing::new([0u8; 32]);
    kdf.hash_password_into(password.as_bytes(), &salt, &mut seed[..])
        .map_err(|e| Error::Validation(format!("Key derivation failed: {}", e)))?;

    let signing_key = SigningKey::from_bytes(&seed);
    Ok(signing_key.verifying_key().to_bytes())
}

async fn derive_blocking(id: &str, password: &str) -> Result<[u8; 32], Error> {
    let id = id.to_string();
    let password = Zeroizing::new(password.to_string());
    tokio::task::spawn_blocking(move || derive_public_key(&id, &password))
        .await
        .map_err(|e| Error::Other(format!("Key derivation task failed: {}", e)))?
}

/// Wallet backend keeping accounts in memory
pub struct LocalKeyring {
    accounts: RwLock<Vec<AccountRecord>>,
    prefix: u16,
}

impl LocalKeyring {
    /// Create a keyring seeded with known accounts, encoding new addresses with `prefix`
    pub fn new(accounts: Vec<AccountRecord>, prefix: u16) -> Self {
        Self {
            accounts: RwLock::new(accounts),
            prefix,
        }
    }

    async fn address_for(&self, id: &str, password: &str) -> Result<String, Error> {
        let public_key = derive_blocking(id, password).await?;
        encode_address(&public_key, self.prefix)
    }
}

fn same_account(record: &AccountRecord, address: &str) -> bool {
    if record.address == address {
        return true;
    }
    match (decode_address(&record.address), decode_address(address)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[async_trait]
impl WalletApi for LocalKeyring {
    async fn validate_cesium_wallet(
        &self,
        id: &str,
        password: &str,
        key_type: KeyType,
    ) -> Result<ValidatedAccount, Error> {
        if key_type != CESIUM_KEY_TYPE {
            return Err(Error::Validation(format!(
                "Cesium wallets use {} keys, not {}",
                CESIUM_KEY_TYPE, key_type
            )));
        }

        let address = self.address_for(id, password).await?;
        tracing::debug!(%address, "Cesium credentials resolved");
        Ok(ValidatedAccount { address })
    }

    async fn create_account_cesium(&self, request: CreateAccountRequest) -> Result<(), Error> {
        if request.name.trim().is_empty() {
            return Err(Error::Creation("Account name is required".to_string()));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(Error::Creation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if request.key_type != CESIUM_KEY_TYPE {
            return Err(Error::Creation(format!(
                "Unsupported key type for Cesium accounts: {}",
                request.key_type
            )));
        }

        let address = self
            .address_for(&request.id, &request.wallet_password)
            .await
            .map_err(|e| Error::Creation(e.to_string()))?;

        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| same_account(a, &address)) {
            return Err(Error::Creation(format!(
                "An account with address {} already exists",
                address
            )));
        }

        let mut record = AccountRecord::new(&address)
            .with_name(request.name.trim())
            .with_type(request.key_type);
        record.genesis_hash = request.genesis_hash.filter(|hash| !hash.is_empty());
        record.when_created = Some(chrono::Utc::now());
        accounts.push(record);

        tracing::info!(%address, "Imported Cesium account");
        Ok(())
    }

    async fn show_account(&self, address: &str, is_showing: bool) -> Result<(), Error> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| same_account(a, address))
            .ok_or_else(|| Error::Other(format!("Unknown account {}", address)))?;
        account.is_hidden = !is_showing;
        Ok(())
    }

    async fn accounts(&self) -> Result<Vec<AccountRecord>, Error> {
        Ok(self.accounts.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, password: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            name: name.to_string(),
            password: Zeroizing::new(password.to_string()),
            id: "my-cesium-id".to_string(),
            wallet_password: Zeroizing::new("my-cesium-password".to_string()),
            key_type: KeyType::Ed25519,
            genesis_hash: Some(String::new()),
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_public_key("id", "password").unwrap();
        let b = derive_public_key("id", "password").unwrap();
        let c = derive_public_key("id", "other").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_derivation_rejects_blank_credentials() {
        assert!(matches!(
            derive_public_key("   ", "password"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(derive_public_key("id", ""), Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_validate_resolves_address() {
        let keyring = LocalKeyring::new(Vec::new(), 42);
        let validated = keyring
            .validate_cesium_wallet("my-cesium-id", "my-cesium-password", KeyType::Ed25519)
            .await
            .unwrap();

        let expected = derive_public_key("my-cesium-id", "my-cesium-password").unwrap();
        assert_eq!(decode_address(&validated.address).unwrap(), expected.to_vec());

        let wrong_type = keyring
            .validate_cesium_wallet("my-cesium-id", "my-cesium-password", KeyType::Sr25519)
            .await;
        assert!(matches!(wrong_type, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_account_then_duplicate() {
        let keyring = LocalKeyring::new(Vec::new(), 42);
        keyring
            .create_account_cesium(request("imported", "secret1"))
            .await
            .unwrap();

        let accounts = keyring.accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name.as_deref(), Some("imported"));
        assert_eq!(accounts[0].key_type, Some(KeyType::Ed25519));
        assert!(accounts[0].genesis_hash.is_none());
        assert!(accounts[0].when_created.is_some());

        let duplicate = keyring
            .create_account_cesium(request("again", "secret1"))
            .await;
        assert!(matches!(duplicate, Err(Error::Creation(_))));
    }

    #[tokio::test]
    async fn test_create_account_validates_inputs() {
        let keyring = LocalKeyring::new(Vec::new(), 42);
        assert!(keyring.create_account_cesium(request("", "secret1")).await.is_err());
        assert!(keyring.create_account_cesium(request("name", "123")).await.is_err());
        assert!(keyring.accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_show_account_toggles_hidden_flag() {
        let address = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
        let keyring = LocalKeyring::new(vec![AccountRecord::new(address)], 42);

        keyring.show_account(address, false).await.unwrap();
        assert!(keyring.accounts().await.unwrap()[0].is_hidden);

        // same key under the Polkadot prefix
        keyring
            .show_account("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5", true)
            .await
            .unwrap();
        assert!(!keyring.accounts().await.unwrap()[0].is_hidden);

        assert!(keyring.show_account("unknown", true).await.is_err());
    }
}
