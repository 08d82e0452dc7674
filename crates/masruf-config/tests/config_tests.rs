use masruf_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_matches_the_stock_amounts() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "IQD");
    assert_eq!(cfg.initial_budget, 1_000_000.0);
    assert_eq!(cfg.daily_top_up, 1_000_000.0);
    assert!(cfg.data_root.is_none());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "USD".to_string();
    cfg.daily_top_up = 250_000.0;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.daily_top_up, 250_000.0);
}

#[test]
fn missing_file_loads_as_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = manager.load().expect("load config");
    assert_eq!(cfg.currency, "IQD");
}

#[test]
fn partial_files_fill_in_defaulted_fields() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"currency":"USD"}"#).expect("write config");

    let cfg = ConfigManager::new(path).load().expect("load config");
    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.initial_budget, 1_000_000.0);
}

#[test]
fn data_root_override_wins_over_the_default() {
    let mut cfg = Config::default();
    cfg.data_root = Some("/tmp/masruf-data".into());
    assert_eq!(
        cfg.resolve_data_root(),
        std::path::PathBuf::from("/tmp/masruf-data")
    );
}

#[test]
fn with_base_dir_places_the_file_under_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert!(manager.config_path().ends_with("config/config.json"));
}
