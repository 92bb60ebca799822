//! Application State Management
//!
//! Terminal-side state of the import wizard: text inputs, focus and the selected
//! network. Every edit is forwarded to the [`ImportSession`].

use tui_input::{Input, InputRequest};

use crate::chain::GenesisOption;
use crate::events::Event;
use crate::import::{ImportSession, WizardStep};

/// Focusable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CesiumId,
    CesiumPassword,
    Network,
    Name,
    NewPassword,
    RepeatPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::CesiumId => "Cesium ID",
            Field::CesiumPassword => "Cesium password",
            Field::Network => "Network",
            Field::Name => "Account name",
            Field::NewPassword => "Password for this account",
            Field::RepeatPassword => "Repeat password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            Field::CesiumPassword | Field::NewPassword | Field::RepeatPassword
        )
    }

    /// Fields of a wizard step, in focus order
    pub fn for_step(step: WizardStep) -> &'static [Field] {
        match step {
            WizardStep::Credentials => &[Field::CesiumId, Field::CesiumPassword, Field::Network],
            WizardStep::NamePassword => &[Field::Name, Field::NewPassword, Field::RepeatPassword],
        }
    }
}

/// Terminal application around an import session
pub struct App {
    pub session: ImportSession,
    cesium_id: Input,
    cesium_password: Input,
    name: Input,
    new_password: Input,
    repeat_password: Input,
    networks: Vec<GenesisOption>,
    network_index: usize,
    focus: usize,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(session: ImportSession) -> Self {
        let networks = session.chains().genesis_options();
        Self {
            session,
            cesium_id: Input::default(),
            cesium_password: Input::default(),
            name: Input::default(),
            new_password: Input::default(),
            repeat_password: Input::default(),
            networks,
            network_index: 0,
            focus: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.session.wizard().step()
    }

    pub fn focused_field(&self) -> Field {
        let fields = Field::for_step(self.step());
        fields[self.focus % fields.len()]
    }

    pub fn input(&self, field: Field) -> Option<&Input> {
        match field {
            Field::CesiumId => Some(&self.cesium_id),
            Field::CesiumPassword => Some(&self.cesium_password),
            Field::Network => None,
            Field::Name => Some(&self.name),
            Field::NewPassword => Some(&self.new_password),
            Field::RepeatPassword => Some(&self.repeat_password),
        }
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut Input> {
        match field {
            Field::CesiumId => Some(&mut self.cesium_id),
            Field::CesiumPassword => Some(&mut self.cesium_password),
            Field::Network => None,
            Field::Name => Some(&mut self.name),
            Field::NewPassword => Some(&mut self.new_password),
            Field::RepeatPassword => Some(&mut self.repeat_password),
        }
    }

    pub fn networks(&self) -> &[GenesisOption] {
        &self.networks
    }

    pub fn selected_network(&self) -> Option<&GenesisOption> {
        self.networks.get(self.network_index)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit || self.session.navigation().is_some()
    }

    /// Handle one event; background results go to the session
    pub fn handle_event(&mut self, event: Event) {
        let Some(event) = self.session.handle_event(event) else {
            return;
        };

        if self.session.wizard().address_view().is_actions_menu_open() {
            match event {
                Event::Enter => {
                    if self.session.toggle_visibility() {
                        self.set_status("Changing the account visibility...");
                    }
                    return;
                }
                Event::ToggleActions | Event::Escape => {
                    self.session.close_actions_menu();
                    return;
                }
                Event::Tick | Event::Quit => {}
                // any other input moves away from the card
                _ => self.session.close_actions_menu(),
            }
        }

        match event {
            Event::Quit => self.should_quit = true,
            Event::Tick => {}
            Event::ToggleActions => {
                if !self.session.toggle_actions_menu() {
                    self.set_status("No actions for an account the wallet does not know");
                }
            }
            Event::Tab | Event::Down if self.focused_field() != Field::Network => {
                self.focus_next()
            }
            Event::BackTab | Event::Up if self.focused_field() != Field::Network => {
                self.focus_previous()
            }
            Event::Tab => self.focus_next(),
            Event::BackTab => self.focus_previous(),
            Event::Up => self.cycle_network(false),
            Event::Down => self.cycle_network(true),
            Event::Enter => self.confirm(),
            Event::Escape => match self.step() {
                WizardStep::Credentials => self.should_quit = true,
                WizardStep::NamePassword => {
                    self.session.back();
                    self.focus = 0;
                }
            },
            Event::Char(c) => self.edit(InputRequest::InsertChar(c)),
            Event::Backspace => self.edit(InputRequest::DeletePrevChar),
            Event::Delete => self.edit(InputRequest::DeleteNextChar),
            Event::Left => self.edit(InputRequest::GoToPrevChar),
            Event::Right => self.edit(InputRequest::GoToNextChar),
            _ => {}
        }
    }

    fn focus_next(&mut self) {
        let len = Field::for_step(self.step()).len();
        self.focus = (self.focus + 1) % len;
    }

    fn focus_previous(&mut self) {
        let len = Field::for_step(self.step()).len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn cycle_network(&mut self, forward: bool) {
        if self.networks.is_empty() {
            return;
        }
        let len = self.networks.len();
        self.network_index = if forward {
            (self.network_index + 1) % len
        } else {
            (self.network_index + len - 1) % len
        };

        let genesis = self.networks[self.network_index].value.clone();
        self.session.select_network(&genesis);
    }

    fn edit(&mut self, request: InputRequest) {
        let field = self.focused_field();
        let Some(input) = self.input_mut(field) else {
            return;
        };
        if input.handle(request).is_none() {
            return;
        }

        let value = input.value().to_string();
        match field {
            Field::CesiumId => self.session.set_id(&value),
            Field::CesiumPassword => self.session.set_password(&value),
            Field::Name => self.session.set_name(&value),
            Field::NewPassword => self.session.set_new_password(&value),
            Field::RepeatPassword => self.session.set_repeat_password(&value),
            Field::Network => {}
        }
    }

    fn confirm(&mut self) {
        match self.step() {
            WizardStep::Credentials => {
                if self.session.next_step() {
                    self.focus = 0;
                    self.status = None;
                } else if self.session.wizard().credentials().is_waiting() {
                    self.set_status("Checking the Cesium credentials...");
                }
            }
            WizardStep::NamePassword => {
                if self.session.submit() {
                    self.set_status("Adding the account...");
                } else if !self.session.wizard().is_busy() {
                    self.set_status("Fill in a name and a matching password first");
                }
            }
        }
    }
}
