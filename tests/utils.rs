use async_trait::async_trait;
use g1_extension_ui::{
    account::{AccountRecord, CreateAccountRequest, KeyType, ValidatedAccount},
    chain::ChainRegistry,
    config::Settings,
    import::ImportSession,
    Error, WalletApi,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[cfg(test)]
pub mod test_utils {
    use super::*;

    pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

    /// A validation call seen by the mock
    #[derive(Debug, Clone, PartialEq)]
    pub struct ValidateCall {
        pub id: String,
        pub password: String,
        pub key_type: KeyType,
    }

    /// Scriptable wallet backend recording every call
    #[derive(Default)]
    pub struct MockWalletApi {
        validate_calls: Mutex<Vec<ValidateCall>>,
        created: Mutex<Vec<CreateAccountRequest>>,
        shown: Mutex<Vec<(String, bool)>>,
        accounts: Mutex<Vec<AccountRecord>>,
        addresses: Mutex<HashMap<(String, String), String>>,
        delays: Mutex<HashMap<String, Duration>>,
        rejected: Mutex<HashSet<String>>,
        fail_creation: Mutex<bool>,
        fail_show: Mutex<bool>,
    }

    impl MockWalletApi {
        pub fn new(accounts: Vec<AccountRecord>) -> Arc<Self> {
            let mock = Self::default();
            *mock.accounts.lock().unwrap() = accounts;
            Arc::new(mock)
        }

        /// Address returned for an (id, password) pair
        pub fn with_address(&self, id: &str, password: &str, address: &str) -> &Self {
            self.addresses
                .lock()
                .unwrap()
                .insert((id.to_string(), password.to_string()), address.to_string());
            self
        }

        /// Delay validation of `password`
        pub fn with_delay(&self, password: &str, delay: Duration) -> &Self {
            self.delays
                .lock()
                .unwrap()
                .insert(password.to_string(), delay);
            self
        }

        /// Reject validation of `password`
        pub fn rejecting(&self, password: &str) -> &Self {
            self.rejected.lock().unwrap().insert(password.to_string());
            self
        }

        pub fn fail_creation(&self, fail: bool) {
            *self.fail_creation.lock().unwrap() = fail;
        }

        pub fn fail_show(&self, fail: bool) {
            *self.fail_show.lock().unwrap() = fail;
        }

        pub fn validate_calls(&self) -> Vec<ValidateCall> {
            self.validate_calls.lock().unwrap().clone()
        }

        pub fn created(&self) -> Vec<CreateAccountRequest> {
            self.created.lock().unwrap().clone()
        }

        pub fn shown(&self) -> Vec<(String, bool)> {
            self.shown.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WalletApi for MockWalletApi {
        async fn validate_cesium_wallet(
            &self,
            id: &str,
            password: &str,
            key_type: KeyType,
        ) -> Result<ValidatedAccount, Error> {
            self.validate_calls.lock().unwrap().push(ValidateCall {
                id: id.to_string(),
                password: password.to_string(),
                key_type,
            });

            let delay = self.delays.lock().unwrap().get(password).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.rejected.lock().unwrap().contains(password) {
                return Err(Error::Validation("Wrong credentials".to_string()));
            }

            let address = self
                .addresses
                .lock()
                .unwrap()
                .get(&(id.to_string(), password.to_string()))
                .cloned()
                .unwrap_or_else(|| BOB.to_string());
            Ok(ValidatedAccount { address })
        }

        async fn create_account_cesium(&self, request: CreateAccountRequest) -> Result<(), Error> {
            if *self.fail_creation.lock().unwrap() {
                return Err(Error::Creation("Backend refused the account".to_string()));
            }
            let address = BOB.to_string();
            let record = AccountRecord::new(&address)
                .with_name(request.name.clone())
                .with_type(request.key_type);
            self.accounts.lock().unwrap().push(record);
            self.created.lock().unwrap().push(request);
            Ok(())
        }

        async fn show_account(&self, address: &str, is_showing: bool) -> Result<(), Error> {
            self.shown
                .lock()
                .unwrap()
                .push((address.to_string(), is_showing));
            if *self.fail_show.lock().unwrap() {
                return Err(Error::Other("Backend unavailable".to_string()));
            }
            Ok(())
        }

        async fn accounts(&self) -> Result<Vec<AccountRecord>, Error> {
            Ok(self.accounts.lock().unwrap().clone())
        }
    }

    /// Session over a mock backend with one known account
    pub fn session_with(mock: &Arc<MockWalletApi>, registry: ChainRegistry) -> ImportSession {
        let api: Arc<dyn WalletApi> = mock.clone();
        ImportSession::new(
            api,
            registry,
            Settings::default(),
            vec![AccountRecord::new(ALICE).with_name("alice")],
        )
    }

    /// Handle every event already queued
    pub fn drain(session: &mut ImportSession) {
        while let Some(event) = session.try_next_event() {
            session.handle_event(event);
        }
    }
}
