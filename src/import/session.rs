//! Import Session
//!
//! Owns the wizard, the debounced validator and the single event channel. Input
//! handlers mutate the wizard and hand the resulting effects to the validator; results
//! of background work come back as [`Event`]s through [`ImportSession::next_event`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::account::AccountRecord;
use crate::chain::ChainRegistry;
use crate::config::Settings;
use crate::error::Error;
use crate::events::Event;
use crate::messaging::WalletApi;
use crate::validator::DebouncedValidator;

use super::{FormEffect, ImportWizard, Navigation};

/// Longest wait for a single event in [`ImportSession::run_until`]
pub const RUN_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Async driver of the import wizard
pub struct ImportSession {
    api: Arc<dyn WalletApi>,
    wizard: ImportWizard,
    validator: DebouncedValidator,
    chains: ChainRegistry,
    settings: Settings,
    accounts: Vec<AccountRecord>,
    event_sender: mpsc::UnboundedSender<Event>,
    event_receiver: mpsc::UnboundedReceiver<Event>,
}

impl ImportSession {
    pub fn new(
        api: Arc<dyn WalletApi>,
        chains: ChainRegistry,
        settings: Settings,
        accounts: Vec<AccountRecord>,
    ) -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();
        let validator = DebouncedValidator::new(
            Arc::clone(&api),
            event_sender.clone(),
            settings.debounce_window(),
        );

        let mut session = Self {
            api,
            wizard: ImportWizard::new(),
            validator,
            chains,
            settings,
            accounts,
            event_sender,
            event_receiver,
        };
        session.wizard.on_accounts_changed(&session.accounts);
        session.refresh();
        session
    }

    pub fn wizard(&self) -> &ImportWizard {
        &self.wizard
    }

    pub fn chains(&self) -> &ChainRegistry {
        &self.chains
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn accounts(&self) -> &[AccountRecord] {
        &self.accounts
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.wizard.navigation()
    }

    /// Sender for events produced outside the session, e.g. terminal input
    pub fn event_sender(&self) -> mpsc::UnboundedSender<Event> {
        self.event_sender.clone()
    }

    pub fn set_id(&mut self, id: &str) {
        let effect = self.wizard.credentials_mut().set_id(id);
        self.run_effect(effect);
    }

    pub fn set_password(&mut self, password: &str) {
        let effect = self.wizard.credentials_mut().set_password(password);
        self.run_effect(effect);
    }

    pub fn select_network(&mut self, genesis_hash: &str) {
        let effect = self.wizard.credentials_mut().select_network(genesis_hash);
        self.run_effect(effect);
    }

    pub fn set_name(&mut self, name: &str) {
        self.wizard.name_password_mut().set_name(name);
        self.refresh();
    }

    pub fn set_new_password(&mut self, password: &str) {
        self.wizard.name_password_mut().set_password(password);
    }

    pub fn set_repeat_password(&mut self, repeat: &str) {
        self.wizard.name_password_mut().set_repeat(repeat);
    }

    fn run_effect(&mut self, effect: FormEffect) {
        match effect {
            FormEffect::None => return,
            FormEffect::Schedule(request) => self.validator.schedule(request),
            FormEffect::Cancel(token) => self.validator.supersede(token),
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.wizard.refresh_chain(&self.chains) {
            tracing::debug!(key_type = %self.wizard.key_type(), "Key type changed");
        }
        self.wizard
            .sync_address_view(&self.accounts, &self.chains, &self.settings);
    }

    pub fn next_step(&mut self) -> bool {
        self.wizard.next_step()
    }

    pub fn back(&mut self) {
        self.wizard.back();
    }

    /// Submit the account creation in the background
    ///
    /// Returns `false` when the wizard is not ready or already busy.
    pub fn submit(&mut self) -> bool {
        let Some(request) = self.wizard.submit() else {
            return false;
        };

        let api = Arc::clone(&self.api);
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            let result = api.create_account_cesium(request).await;
            let _ = sender.send(Event::AccountCreated { result });
        });
        true
    }

    /// Fetch a fresh account snapshot in the background
    pub fn request_accounts(&self) {
        let api = Arc::clone(&self.api);
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            send_accounts(api.as_ref(), &sender).await;
        });
    }

    /// Whether the address card offers its actions menu
    ///
    /// Only addresses already known to the wallet have actions.
    pub fn has_card_actions(&self) -> bool {
        let view = self.wizard.address_view();
        view.shows_visibility_action() && view.recoded().account.is_some()
    }

    /// Open or close the actions menu of the address card
    ///
    /// Returns whether the menu is open afterwards.
    pub fn toggle_actions_menu(&mut self) -> bool {
        if !self.has_card_actions() {
            self.close_actions_menu();
            return false;
        }
        let view = self.wizard.address_view_mut();
        view.toggle_actions_menu();
        view.is_actions_menu_open()
    }

    pub fn close_actions_menu(&mut self) {
        self.wizard.address_view_mut().close_actions_menu();
    }

    /// Report where the actions menu was drawn
    pub fn on_menu_measured(&mut self, bottom: u16) {
        self.wizard.address_view_mut().on_menu_measured(bottom);
    }

    /// Flip the visibility of the account on the address card in the background
    ///
    /// The account snapshot is reloaded afterwards; failures are only logged.
    pub fn toggle_visibility(&mut self) -> bool {
        if !self.has_card_actions() {
            return false;
        }
        self.close_actions_menu();

        let view = self.wizard.address_view().clone();
        let api = Arc::clone(&self.api);
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            view.toggle_visibility(api.as_ref()).await;
            send_accounts(api.as_ref(), &sender).await;
        });
        true
    }

    /// Wait for the next event
    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_receiver.recv().await
    }

    /// Pop an already queued event without waiting
    pub fn try_next_event(&mut self) -> Option<Event> {
        self.event_receiver.try_recv().ok()
    }

    /// Apply an asynchronous result to the wizard
    ///
    /// Returns the event back when it is terminal input for the caller to handle.
    pub fn handle_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::ValidationStarted { token } => {
                self.wizard.credentials_mut().on_validation_started(token);
            }
            Event::CredentialsValidated { token, result } => {
                if self.wizard.credentials_mut().apply_validation(token, result) {
                    self.refresh();
                }
            }
            Event::AccountCreated { result } => {
                let created = result.is_ok();
                self.wizard.on_account_created(result);
                if created {
                    self.request_accounts();
                }
            }
            Event::AccountsUpdated(accounts) => {
                self.accounts = accounts;
                self.wizard.on_accounts_changed(&self.accounts);
                self.refresh();
            }
            other => return Some(other),
        }
        None
    }

    /// Handle events until `done` holds for the wizard
    ///
    /// Used by headless drivers; the TUI has its own loop. Fails when no event arrives
    /// for [`RUN_IDLE_TIMEOUT`] while `done` still does not hold.
    pub async fn run_until<F>(&mut self, mut done: F) -> Result<(), Error>
    where
        F: FnMut(&ImportWizard) -> bool,
    {
        while !done(&self.wizard) {
            match tokio::time::timeout(RUN_IDLE_TIMEOUT, self.next_event()).await {
                Ok(Some(event)) => {
                    self.handle_event(event);
                }
                _ => {
                    return Err(Error::Other(format!(
                        "No event within {:?}, the wizard is stalled",
                        RUN_IDLE_TIMEOUT
                    )));
                }
            }
        }
        Ok(())
    }
}

async fn send_accounts(api: &dyn WalletApi, sender: &mpsc::UnboundedSender<Event>) {
    match api.accounts().await {
        Ok(accounts) => {
            let _ = sender.send(Event::AccountsUpdated(accounts));
        }
        Err(e) => tracing::warn!(error = %e, "Failed to load accounts"),
    }
}
