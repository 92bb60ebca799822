//! Cesium Wallet Import Wizard
//!
//! Two steps: Cesium credentials plus network, then the name and password of the new
//! account. The wizard itself is synchronous state; [`ImportSession`] drives it from the
//! event channel.

pub mod credentials;
pub mod name_password;
pub mod session;

pub use credentials::{CredentialForm, FormEffect, ValidationPhase, INVALID_CREDENTIALS};
pub use name_password::{NamePasswordField, NamePasswordForm};
pub use session::{ImportSession, RUN_IDLE_TIMEOUT};

use zeroize::Zeroizing;

use crate::account::{
    AccountInfo, AccountRecord, CreateAccountRequest, KeyType, CESIUM_KEY_TYPE, DEFAULT_TYPE,
};
use crate::address::{AddressProps, AddressView};
use crate::chain::{Chain, ChainResolver};
use crate::config::Settings;
use crate::error::Error;

/// Wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Credentials,
    NamePassword,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Credentials => "Cesium ID and password",
            Self::NamePassword => "Account name and password",
        }
    }

    /// (current, total)
    pub fn step_number(&self) -> (usize, usize) {
        match self {
            Self::Credentials => (1, 2),
            Self::NamePassword => (2, 2),
        }
    }
}

/// Where the host should navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Leave the wizard without a target
    Back,
    /// Go to a route
    To(String),
}

/// Import wizard state
#[derive(Debug)]
pub struct ImportWizard {
    step: WizardStep,
    credentials: CredentialForm,
    name_password: NamePasswordForm,
    /// Type derived from the chain of the selected network
    key_type: KeyType,
    chain: Option<Chain>,
    is_busy: bool,
    navigation: Option<Navigation>,
    address_view: AddressView,
}

impl Default for ImportWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Credentials,
            credentials: CredentialForm::new(CESIUM_KEY_TYPE),
            name_password: NamePasswordForm::new(),
            key_type: DEFAULT_TYPE,
            chain: None,
            is_busy: false,
            navigation: None,
            address_view: AddressView::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn credentials(&self) -> &CredentialForm {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut CredentialForm {
        &mut self.credentials
    }

    pub fn name_password(&self) -> &NamePasswordForm {
        &self.name_password
    }

    pub fn name_password_mut(&mut self) -> &mut NamePasswordForm {
        &mut self.name_password
    }

    /// Validated account, once step 1 succeeded
    pub fn account(&self) -> Option<&AccountInfo> {
        self.credentials.account()
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn chain(&self) -> Option<&Chain> {
        self.chain.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn address_view(&self) -> &AddressView {
        &self.address_view
    }

    pub fn address_view_mut(&mut self) -> &mut AddressView {
        &mut self.address_view
    }

    /// React to a new snapshot of the known accounts
    ///
    /// The wizard cannot be used without any account in the extension.
    pub fn on_accounts_changed(&mut self, accounts: &[AccountRecord]) -> Option<&Navigation> {
        if accounts.is_empty() {
            tracing::info!("No accounts in the extension, leaving the import wizard");
            self.navigation = Some(Navigation::Back);
        }
        self.navigation.as_ref()
    }

    /// Re-resolve the chain of the selected account and the key type that follows from it
    ///
    /// Returns `true` when the key type changed.
    pub fn refresh_chain(&mut self, chains: &dyn ChainResolver) -> bool {
        let chain = self
            .credentials
            .account()
            .and_then(AccountInfo::genesis)
            .and_then(|hash| chains.resolve(hash));

        let key_type = if chain.as_ref().map(Chain::is_ethereum).unwrap_or(false) {
            KeyType::Ethereum
        } else {
            DEFAULT_TYPE
        };

        self.chain = chain;
        let changed = key_type != self.key_type;
        self.key_type = key_type;
        changed
    }

    pub fn can_go_next(&self) -> bool {
        self.step == WizardStep::Credentials && self.credentials.can_proceed()
    }

    /// Move to the name/password step when the credentials are validated
    pub fn next_step(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.step = WizardStep::NamePassword;
        true
    }

    pub fn back(&mut self) {
        self.step = WizardStep::Credentials;
    }

    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::NamePassword
            && !self.is_busy
            && self.name_password.is_valid()
            && self.credentials.account().is_some()
    }

    /// Build the account creation call and mark the wizard busy
    ///
    /// Cesium accounts are always created with the ed25519 algorithm.
    pub fn submit(&mut self) -> Option<CreateAccountRequest> {
        if !self.can_submit() {
            return None;
        }
        let (name, password) = self.name_password.values()?;
        let account = self.credentials.account()?;

        let request = CreateAccountRequest {
            name: name.to_string(),
            password: Zeroizing::new(password.to_string()),
            id: account.id.clone(),
            wallet_password: account.password.clone(),
            key_type: CESIUM_KEY_TYPE,
            genesis_hash: account.genesis().map(str::to_string),
        };

        self.is_busy = true;
        Some(request)
    }

    /// Outcome of the creation call
    pub fn on_account_created(&mut self, result: Result<(), Error>) -> Option<&Navigation> {
        match result {
            Ok(()) => {
                self.navigation = Some(Navigation::To("/".to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Cesium account");
                self.is_busy = false;
            }
        }
        self.navigation.as_ref()
    }

    /// Inputs of the address card at the top of the wizard
    pub fn address_props(&self) -> AddressProps {
        let account = self.credentials.account();
        AddressProps {
            address: account.map(|a| a.address.clone()),
            genesis_hash: account.and_then(|a| a.genesis()).map(str::to_string),
            name: self.name_password.display_name().map(str::to_string),
            given_type: Some(self.key_type),
            has_actions: true,
            ..AddressProps::default()
        }
    }

    /// Bring the address card up to date; `true` when it was recomputed
    pub fn sync_address_view(
        &mut self,
        accounts: &[AccountRecord],
        chains: &dyn ChainResolver,
        settings: &Settings,
    ) -> bool {
        let props = self.address_props();
        if &props != self.address_view.props() {
            self.address_view.set_props(props);
        }
        self.address_view.sync(accounts, chains, settings)
    }
}
