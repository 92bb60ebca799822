//! Wallet backend messaging API
//!
//! The UI talks to the wallet backend through request/response calls only; no
//! ordering between concurrent calls is assumed.

use async_trait::async_trait;

use crate::account::{AccountRecord, CreateAccountRequest, KeyType, ValidatedAccount};
use crate::error::Error;

#[async_trait]
pub trait WalletApi: Send + Sync {
    /// Resolve a Cesium ID/password pair to the account it controls
    ///
    /// Rejects with [`Error::Validation`] when the credentials are not acceptable.
    async fn validate_cesium_wallet(
        &self,
        id: &str,
        password: &str,
        key_type: KeyType,
    ) -> Result<ValidatedAccount, Error>;

    /// Create an account from Cesium credentials
    async fn create_account_cesium(&self, request: CreateAccountRequest) -> Result<(), Error>;

    /// Show or hide an account
    async fn show_account(&self, address: &str, is_showing: bool) -> Result<(), Error>;

    /// Snapshot of the accounts known to the backend
    async fn accounts(&self) -> Result<Vec<AccountRecord>, Error>;
}
