use std::{env, fs};

use storefront_config::{ClientConfig, ConfigError, SharedConfig, load_config, save_config};

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("storefront.toml");

    let toml_content = r#"
[api]
endpoint = "https://shop.example.com"
access_token = "SWSCTESTKEY"
timeout_ms = 2500

[search]
default_pagination_limit = 25
pagination_limits = [10, 25, 50]

[logging]
level = "debug"
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(Some(&path)).expect("should parse config");
    assert_eq!(cfg.api.endpoint, "https://shop.example.com");
    assert_eq!(cfg.api.access_token, "SWSCTESTKEY");
    assert_eq!(cfg.search.default_pagination_limit, 25);
    assert_eq!(cfg.search.pagination_limits, vec![10, 25, 50]);
    assert_eq!(cfg.logging.level, "debug");

    let converter = cfg.converter_config();
    assert!(converter.accepts_limit(50));
    assert!(!converter.accepts_limit(100));

    // 2) Env override should win over file
    unsafe {
        env::set_var("STOREFRONT__API__TIMEOUT_MS", "4000");
    }
    let cfg_env = load_config(Some(&path)).expect("should parse config with env overrides");
    assert_eq!(cfg_env.api.timeout_ms, 4000);
    assert_eq!(cfg_env.search.default_pagination_limit, 25);
    unsafe {
        env::remove_var("STOREFRONT__API__TIMEOUT_MS");
    }

    // 3) Invalid config should error
    let invalid_path = dir.path().join("invalid.toml");
    let invalid_toml = r#"
[api]
endpoint = "shop.example.com"
"#;
    fs::write(&invalid_path, invalid_toml).expect("write invalid toml");
    let err = load_config(Some(&invalid_path)).expect_err("expected validation error");
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("api.endpoint"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let cfg = load_config(Some(&dir.path().join("absent.toml"))).expect("defaults");
    assert_eq!(cfg.api.endpoint, "http://localhost:8000");
    assert_eq!(cfg.search.pagination_limits, vec![1, 5, 10, 25, 50, 75, 100, 500]);
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("nested").join("storefront.toml");

    let mut cfg = ClientConfig::default();
    cfg.api.endpoint = "https://pwa.example.com".into();
    cfg.api.language_id = Some("2fbb5fe2e29a4d70aa5854ce7ce3e20b".into());
    cfg.search.default_pagination_limit = 75;

    save_config(&path, &cfg).expect("save");
    let loaded = load_config(Some(&path)).expect("load");
    assert_eq!(loaded.api.endpoint, cfg.api.endpoint);
    assert_eq!(loaded.api.language_id, cfg.api.language_id);
    assert_eq!(loaded.search.default_pagination_limit, 75);

    let shared = SharedConfig::new(loaded).expect("valid");
    assert_eq!(shared.converter_config().default_pagination_limit, 75);
}
