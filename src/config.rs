use config::{Config as ConfigLoader, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::account::AccountRecord;
use crate::chain::{default_chains, Chain, ChainRegistry};
use crate::codec::{DEFAULT_SS58_PREFIX, MAX_SS58_PREFIX, RESERVED_PREFIXES};
use crate::error::Error;

/// Settings value meaning "no prefix chosen by the user"
pub const UNSET_PREFIX: i32 = -1;

/// Default quiescence window before credentials are validated
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Global display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Address prefix chosen by the user, `-1` when unset
    #[serde(default = "default_prefix")]
    pub prefix: i32,
    /// Quiescence window for credential validation, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_prefix() -> i32 {
    UNSET_PREFIX
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: UNSET_PREFIX,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Settings {
    /// Settings with an explicit prefix
    pub fn with_prefix(prefix: i32) -> Self {
        Self {
            prefix,
            ..Self::default()
        }
    }

    /// Prefix to encode addresses with when no chain is known
    pub fn resolved_prefix(&self) -> u16 {
        if self.prefix == UNSET_PREFIX {
            return DEFAULT_SS58_PREFIX;
        }

        match u16::try_from(self.prefix) {
            Ok(prefix) if prefix <= MAX_SS58_PREFIX && !RESERVED_PREFIXES.contains(&prefix) => {
                prefix
            }
            _ => {
                tracing::warn!(prefix = self.prefix, "Ignoring unusable address prefix");
                DEFAULT_SS58_PREFIX
            }
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Complete configuration of the extension UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display settings
    #[serde(default)]
    pub settings: Settings,
    /// Chains known to the UI, in addition to the built-in relay chains
    #[serde(default)]
    pub chains: Vec<Chain>,
    /// Snapshot of accounts already present in the wallet
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
}

impl Config {
    /// Load configuration from a TOML file, with `G1_EXTENSION__*` environment overrides
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let settings = ConfigLoader::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("G1_EXTENSION")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Config>().map_err(Error::from)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("g1-extension");
        path.push("config.toml");
        path
    }

    /// Built-in chains merged with the configured ones
    pub fn chain_registry(&self) -> ChainRegistry {
        let mut registry = ChainRegistry::new(default_chains());
        for chain in &self.chains {
            registry.insert(chain.clone());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_prefix_resolves_to_default() {
        assert_eq!(Settings::default().resolved_prefix(), 42);
        assert_eq!(Settings::with_prefix(-1).resolved_prefix(), 42);
    }

    #[test]
    fn test_explicit_prefix_is_used() {
        assert_eq!(Settings::with_prefix(0).resolved_prefix(), 0);
        assert_eq!(Settings::with_prefix(4450).resolved_prefix(), 4450);
    }

    #[test]
    fn test_invalid_prefix_falls_back() {
        assert_eq!(Settings::with_prefix(-7).resolved_prefix(), 42);
        assert_eq!(Settings::with_prefix(70_000).resolved_prefix(), 42);
        assert_eq!(Settings::with_prefix(46).resolved_prefix(), 42);
        assert_eq!(Settings::with_prefix(47).resolved_prefix(), 42);
        assert_eq!(Settings::with_prefix(48).resolved_prefix(), 48);
    }

    #[test]
    fn test_debounce_window_default() {
        assert_eq!(
            Settings::default().debounce_window(),
            Duration::from_millis(600)
        );
    }
}
