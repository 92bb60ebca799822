use g1_extension_ui::{
    account::{AccountRecord, KeyType},
    chain::{Chain, ChainResolver, ChainType},
    config::{Config, Settings, DEFAULT_DEBOUNCE_MS, UNSET_PREFIX},
};
use std::time::Duration;

const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("missing.toml")).unwrap();

    assert_eq!(config.settings.prefix, UNSET_PREFIX);
    assert_eq!(config.settings.debounce_ms, DEFAULT_DEBOUNCE_MS);
    assert!(config.accounts.is_empty());
    assert_eq!(config.chain_registry().chains().len(), 2);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        settings: Settings {
            prefix: 0,
            debounce_ms: 250,
        },
        chains: vec![Chain {
            genesis_hash: "0x1234".to_string(),
            name: "Ğ1 Test".to_string(),
            ss58_format: 4450,
            chain_type: ChainType::Substrate,
            color: Some("#9b59b6".to_string()),
            icon: "substrate".to_string(),
        }],
        accounts: vec![AccountRecord::new(ALICE)
            .with_name("alice")
            .with_type(KeyType::Ed25519)],
    };
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.settings, config.settings);
    assert_eq!(loaded.settings.debounce_window(), Duration::from_millis(250));
    assert_eq!(loaded.accounts, config.accounts);

    let registry = loaded.chain_registry();
    assert_eq!(registry.chains().len(), 3);
    assert_eq!(registry.resolve("0x1234").unwrap().ss58_format, 4450);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[settings]\nprefix = 2\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.settings.prefix, 2);
    assert_eq!(config.settings.resolved_prefix(), 2);
    assert_eq!(config.settings.debounce_ms, DEFAULT_DEBOUNCE_MS);
}

#[test]
fn test_out_of_range_prefix_falls_back() {
    assert_eq!(Settings::with_prefix(UNSET_PREFIX).resolved_prefix(), 42);
    assert_eq!(Settings::with_prefix(70_000).resolved_prefix(), 42);
    assert_eq!(Settings::with_prefix(-5).resolved_prefix(), 42);
}
