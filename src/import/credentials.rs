//! Cesium ID/password step
//!
//! Pure state of the first wizard step. Input handlers return a [`FormEffect`] which the
//! session hands to the [`DebouncedValidator`](crate::validator::DebouncedValidator);
//! results come back through [`CredentialForm::apply_validation`].

use zeroize::Zeroizing;

use crate::account::{AccountInfo, CredentialPair, KeyType, ValidatedAccount};
use crate::error::Error;
use crate::validator::{OperationToken, ValidationRequest};

pub const INVALID_CREDENTIALS: &str = "Invalid Cesium ID or password";
pub const WRONG_ID_FORMAT: &str = "Wrong Cesium wallet ID format";
pub const WRONG_PASSWORD_FORMAT: &str = "Wrong Cesium wallet password format";

/// Progress of the current validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPhase {
    /// Nothing to validate
    Idle,
    /// Waiting for the quiescence window to elapse
    PendingDebounce,
    /// Backend call in flight
    Validating,
    Valid,
    Invalid,
}

/// Work requested by an input change
#[derive(Debug)]
pub enum FormEffect {
    /// Nothing changed
    None,
    /// Validate these credentials after the quiescence window
    Schedule(ValidationRequest),
    /// Drop anything older than this token
    Cancel(OperationToken),
}

/// State of the credential step
#[derive(Debug)]
pub struct CredentialForm {
    credentials: CredentialPair,
    /// Selected network, empty for "any chain"
    genesis: String,
    key_type: KeyType,
    address: String,
    error: Option<String>,
    phase: ValidationPhase,
    token: OperationToken,
    account: Option<AccountInfo>,
}

impl CredentialForm {
    pub fn new(key_type: KeyType) -> Self {
        Self {
            credentials: CredentialPair::default(),
            genesis: String::new(),
            key_type,
            address: String::new(),
            error: None,
            phase: ValidationPhase::Idle,
            token: OperationToken::default(),
            account: None,
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> FormEffect {
        let id = id.into();
        if self.credentials.id.as_deref() == Some(id.as_str()) {
            return FormEffect::None;
        }
        self.credentials.id = Some(id);
        self.on_input_changed()
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> FormEffect {
        let password = password.into();
        if self.credentials.password.as_deref() == Some(password.as_str()) {
            return FormEffect::None;
        }
        self.credentials.password = Some(password);
        self.on_input_changed()
    }

    /// Select the network the account will be restricted to
    pub fn select_network(&mut self, genesis: impl Into<String>) -> FormEffect {
        let genesis = genesis.into();
        if self.genesis == genesis {
            return FormEffect::None;
        }
        self.genesis = genesis;
        self.on_input_changed()
    }

    fn on_input_changed(&mut self) -> FormEffect {
        self.token = self.token.next();

        let complete = self
            .credentials
            .complete()
            .map(|(id, password)| (id.to_string(), Zeroizing::new(password.to_string())));

        match complete {
            None => {
                self.account = None;
                self.address.clear();
                self.phase = ValidationPhase::Idle;
                FormEffect::Cancel(self.token)
            }
            Some((id, password)) => {
                self.phase = ValidationPhase::PendingDebounce;
                FormEffect::Schedule(ValidationRequest {
                    token: self.token,
                    id,
                    password,
                    key_type: self.key_type,
                })
            }
        }
    }

    /// The backend call for `token` started
    pub fn on_validation_started(&mut self, token: OperationToken) {
        if token == self.token && self.phase == ValidationPhase::PendingDebounce {
            self.phase = ValidationPhase::Validating;
        }
    }

    /// Apply a validation result; results of superseded tokens are ignored
    ///
    /// Returns `true` when the result was applied.
    pub fn apply_validation(
        &mut self,
        token: OperationToken,
        result: Result<ValidatedAccount, Error>,
    ) -> bool {
        if token != self.token {
            tracing::trace!(%token, current = %self.token, "Dropping stale validation result");
            return false;
        }

        match result {
            Ok(validated) => {
                let (id, password) = self.credentials.complete().unwrap_or_default();
                let account = AccountInfo::from_validated(
                    validated,
                    &self.genesis,
                    self.key_type,
                    id,
                    password,
                );
                self.error = None;
                self.address = account.address.clone();
                self.account = Some(account);
                self.phase = ValidationPhase::Valid;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Cesium credentials rejected");
                self.address.clear();
                self.account = None;
                self.error = Some(INVALID_CREDENTIALS.to_string());
                self.phase = ValidationPhase::Invalid;
            }
        }

        true
    }

    pub fn id(&self) -> &str {
        self.credentials.id.as_deref().unwrap_or("")
    }

    pub fn password(&self) -> &str {
        self.credentials.password.as_deref().unwrap_or("")
    }

    pub fn genesis(&self) -> &str {
        &self.genesis
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> ValidationPhase {
        self.phase
    }

    pub fn token(&self) -> OperationToken {
        self.token
    }

    /// Validated account published to the wizard
    pub fn account(&self) -> Option<&AccountInfo> {
        self.account.as_ref()
    }

    /// A validation is scheduled or in flight
    pub fn is_waiting(&self) -> bool {
        matches!(
            self.phase,
            ValidationPhase::PendingDebounce | ValidationPhase::Validating
        )
    }

    /// Whether the "Next" control is enabled
    pub fn can_proceed(&self) -> bool {
        !self.address.is_empty() && self.error.is_none() && !self.is_waiting()
    }

    pub fn id_warning(&self) -> Option<&'static str> {
        (self.error.is_some() && self.id().is_empty()).then_some(WRONG_ID_FORMAT)
    }

    pub fn password_warning(&self) -> Option<&'static str> {
        (self.error.is_some() && self.password().is_empty()).then_some(WRONG_PASSWORD_FORMAT)
    }
}
