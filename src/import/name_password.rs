//! Account name and password step

use zeroize::Zeroizing;

use crate::account::MIN_PASSWORD_LENGTH;

pub const NAME_REQUIRED: &str = "Account name is required";
pub const PASSWORD_TOO_SHORT: &str = "Password is too short";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Which input of the step has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePasswordField {
    #[default]
    Name,
    Password,
    Repeat,
}

impl NamePasswordField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Password,
            Self::Password => Self::Repeat,
            Self::Repeat => Self::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Name => Self::Repeat,
            Self::Password => Self::Name,
            Self::Repeat => Self::Password,
        }
    }
}

/// Name and password protecting the imported account
#[derive(Debug, Default)]
pub struct NamePasswordForm {
    name: String,
    password: Zeroizing<String>,
    repeat: Zeroizing<String>,
}

impl NamePasswordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
    }

    pub fn set_repeat(&mut self, repeat: impl Into<String>) {
        self.repeat = Zeroizing::new(repeat.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name to show on the address card, `None` while empty
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn repeat(&self) -> &str {
        &self.repeat
    }

    pub fn name_error(&self) -> Option<&'static str> {
        self.name.trim().is_empty().then_some(NAME_REQUIRED)
    }

    /// Only reported once something was typed
    pub fn password_error(&self) -> Option<&'static str> {
        (!self.password.is_empty() && self.password.len() < MIN_PASSWORD_LENGTH)
            .then_some(PASSWORD_TOO_SHORT)
    }

    pub fn repeat_error(&self) -> Option<&'static str> {
        (!self.repeat.is_empty() && *self.repeat != *self.password)
            .then_some(PASSWORDS_DO_NOT_MATCH)
    }

    /// Validated name and password, ready for submission
    pub fn values(&self) -> Option<(&str, &str)> {
        let valid = self.name_error().is_none()
            && self.password.len() >= MIN_PASSWORD_LENGTH
            && *self.repeat == *self.password;
        valid.then(|| (self.name.trim(), self.password.as_str()))
    }

    pub fn is_valid(&self) -> bool {
        self.values().is_some()
    }
}
