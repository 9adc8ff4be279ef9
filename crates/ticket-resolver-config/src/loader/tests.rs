//! Loader tests: inline parsing, schema errors and layer precedence.

use super::*;
use crate::StorageBackend;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn put(path: &Path, contents: &str) {
    let dir = path.parent().expect("layer path has a parent");
    fs::create_dir_all(dir).expect("create layer dir");
    fs::write(path, contents).expect("write layer");
}

/// A minimal config keeps the demo's original timings.
#[test]
fn parse_minimal_config() {
    let config = ResolverConfig::load_from_str("{}").expect("config");
    assert_eq!(config.analysis.delay_ms, 3000);
    assert_eq!(config.auth.delay_ms, 1500);
    assert_eq!(config.auth.min_password_len, 6);
    assert_eq!(config.settings.connection_test_delay_ms, 2000);
    assert_eq!(config.storage.backend, StorageBackend::File);
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = ResolverConfig::load_from_str(r#"{ unexpected: true }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
}

#[test]
fn rejects_invalid_storage_backend() {
    let err = ResolverConfig::load_from_str(r#"{ storage: { backend: "redis" } }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("storage.backend"));
}

#[test]
fn rejects_negative_delay() {
    let err = ResolverConfig::load_from_str(r#"{ analysis: { delay_ms: -5 } }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("analysis.delay_ms"));
}

#[test]
fn rejects_zero_password_length() {
    let err = ResolverConfig::load_from_str(r#"{ auth: { min_password_len: 0 } }"#).unwrap_err();
    match err {
        ConfigError::InvalidField { path, .. } => assert_eq!(path, "auth.min_password_len"),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Runtime layers win over cwd, which wins over user.
#[test]
fn layered_config_applies_precedence() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("user.json5");
    put(
        &user_config,
        "{ analysis: { delay_ms: 10 }, auth: { delay_ms: 11 }, storage: { backend: \"memory\" } }",
    );
    put(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ analysis: { delay_ms: 20 }, auth: { min_password_len: 8 } }",
    );
    let runtime_config = root.join("runtime.json5");
    put(&runtime_config, "{ analysis: { delay_ms: 30 } }");

    let mut options = LayeredConfigOptions::new(&cwd).with_runtime_path(&runtime_config);
    options.user_config_path = Some(user_config);

    let layered = ResolverConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 3);
    assert_eq!(layered.config.analysis.delay_ms, 30);
    assert_eq!(layered.config.auth.delay_ms, 11);
    assert_eq!(layered.config.auth.min_password_len, 8);
    assert_eq!(layered.config.storage.backend, StorageBackend::Memory);
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let mut options =
        LayeredConfigOptions::new(temp.path()).with_runtime_path(temp.path().join("nope.json5"));
    options.user_config_path = None;
    let err = ResolverConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn layer_errors_name_the_layer() {
    let temp = TempDir::new().expect("tmp");
    put(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ auth: { password_policy: \"strict\" } }",
    );
    let mut options = LayeredConfigOptions::new(temp.path());
    options.user_config_path = None;
    let err = ResolverConfig::load_layered_with_options(options).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("auth.password_policy"));
}

#[test]
fn without_delays_zeroes_every_timer() {
    let config = ResolverConfig::without_delays();
    assert_eq!(config.analysis.delay(), std::time::Duration::ZERO);
    assert_eq!(config.auth.delay(), std::time::Duration::ZERO);
    assert_eq!(
        config.settings.connection_test_delay(),
        std::time::Duration::ZERO
    );
    assert_eq!(config.auth.min_password_len, 6);
}
