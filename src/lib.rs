pub mod account;
pub mod address;
pub mod chain;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod import;
pub mod keyring;
pub mod logging;
pub mod messaging;
pub mod validator;

// TUI module - optional via "tui" feature
#[cfg(feature = "tui")]
pub mod tui;

pub use account::{AccountInfo, AccountRecord, CredentialPair, KeyType, DEFAULT_TYPE};
pub use address::{recode, AddressProps, AddressView, RecodedAddress};
pub use chain::{Chain, ChainRegistry, ChainResolver, ChainType};
pub use config::{Config, Settings};
pub use error::Error;
pub use events::Event;
pub use import::{ImportSession, ImportWizard, Navigation, WizardStep};
pub use keyring::LocalKeyring;
pub use messaging::WalletApi;
pub use validator::{DebouncedValidator, OperationToken};

// Re-export TUI entry point when feature is enabled
#[cfg(feature = "tui")]
pub use tui::run_tui;
