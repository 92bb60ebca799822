use g1_extension_ui::config::Config;

// Kept in its own test binary: environment variables are process wide.
#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[settings]\nprefix = 2\ndebounce_ms = 600\n").unwrap();

    std::env::set_var("G1_EXTENSION__SETTINGS__DEBOUNCE_MS", "250");
    let config = Config::load(&path);
    std::env::remove_var("G1_EXTENSION__SETTINGS__DEBOUNCE_MS");

    let config = config.unwrap();
    assert_eq!(config.settings.debounce_ms, 250);
    assert_eq!(config.settings.prefix, 2);
}
