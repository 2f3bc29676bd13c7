//! Configuration loading tests
//!
//! Covers YAML files on disk, missing and malformed files, and environment
//! overrides applied on top of loaded values.

use dashboard::config::{DEFAULT_PORT, DashboardConfig, StorageBackend};
use dashboard::core::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = yaml_file(
        r#"
server:
  host: 127.0.0.1
  port: 9000
storage:
  backend: mongodb
  uri: mongodb://mongo:27017/sales
  database: reporting
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:9000");
    assert_eq!(config.storage.backend, StorageBackend::Mongodb);
    assert_eq!(config.storage.uri, "mongodb://mongo:27017/sales");
    assert_eq!(config.storage.database.as_deref(), Some("reporting"));
}

#[test]
fn test_load_partial_file_uses_defaults() {
    let file = yaml_file("storage:\n  backend: in-memory\n");

    let config = DashboardConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.storage.backend, StorageBackend::InMemory);
}

#[test]
fn test_missing_file() {
    let result = DashboardConfig::from_yaml_file("/definitely/not/here/dashboard.yaml");
    match result {
        Err(ConfigError::FileNotFound { path }) => assert!(path.ends_with("dashboard.yaml")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_names_the_file() {
    let file = yaml_file("server:\n  port: not-a-number\n");

    let err = DashboardConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { file: Some(_), .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_overrides_win_over_file() {
    let file = yaml_file("server:\n  port: 9000\n");

    let config = DashboardConfig::from_yaml_file(file.path())
        .unwrap()
        .with_overrides(|name| match name {
            "PORT" => Some("7000".to_string()),
            "MONGO_URI" => Some("mongodb://override:27017/x".to_string()),
            _ => None,
        });
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.storage.uri, "mongodb://override:27017/x");
}
