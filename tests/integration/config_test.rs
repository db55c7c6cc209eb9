//! Configuration file loading tests.

use db_gateway::config::Config;
use db_gateway::error::ConfigError;
use std::path::PathBuf;

#[test]
fn test_load_full_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 8088
workers = 2

[logging]
level = "debug"
file = "gateway.log"
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.server.bind_address(), "0.0.0.0:8088");
    assert_eq!(config.server.workers, 2);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, Some(PathBuf::from("gateway.log")));
}

#[test]
fn test_unknown_sections_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[metrics]\nenabled = true\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
