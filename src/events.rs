//! Application Events
//!
//! Terminal input and asynchronous results funnel through a single event channel
//! consumed by the import session.

use crate::account::{AccountRecord, ValidatedAccount};
use crate::error::Error;
use crate::validator::OperationToken;

/// Events handled by the import session
#[derive(Debug)]
pub enum Event {
    /// Quit the application
    Quit,
    /// Move focus to the next field
    Tab,
    /// Move focus to the previous field (Shift+Tab)
    BackTab,
    /// Enter/confirm action
    Enter,
    /// Escape/cancel action
    Escape,
    /// Arrow key navigation
    Up,
    Down,
    Left,
    Right,
    /// Character input
    Char(char),
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Periodic redraw
    Tick,
    /// Open or close the actions menu of the address card
    ToggleActions,

    /// The quiescence window elapsed and the backend call for `token` started
    ValidationStarted { token: OperationToken },
    /// Credential validation finished
    CredentialsValidated {
        token: OperationToken,
        result: Result<ValidatedAccount, Error>,
    },
    /// Account creation finished
    AccountCreated { result: Result<(), Error> },
    /// New snapshot of the backend's accounts
    AccountsUpdated(Vec<AccountRecord>),
}
