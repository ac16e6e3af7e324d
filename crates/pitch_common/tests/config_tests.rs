//! Tests for config.rs file loading

use pitch_common::{LlmConfig, PitchConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_path_full_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
port = 7000

[llm]
api_base = "http://localhost:8081/v1"
model = "llama-3.1-8b-instant"
reply_temperature = 0.9
evaluation_max_tokens = 300
timeout_secs = 15
"#,
    )
    .unwrap();

    let config = PitchConfig::load_from_path(&path).unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:7000");
    assert_eq!(config.llm.api_base, "http://localhost:8081/v1");
    assert_eq!(config.llm.model, "llama-3.1-8b-instant");
    assert!((config.llm.reply_temperature - 0.9).abs() < f32::EPSILON);
    assert_eq!(config.llm.reply_max_tokens, 200);
    assert_eq!(config.llm.evaluation_max_tokens, 300);
    assert_eq!(config.llm.timeout_secs, 15);
}

#[test]
fn test_load_from_path_empty_file_is_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let config = PitchConfig::load_from_path(&path).unwrap();
    assert_eq!(config, PitchConfig::default());
    assert_eq!(config.llm, LlmConfig::default());
}

#[test]
fn test_load_from_missing_path_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    let err = PitchConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_from_path_rejects_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[server]\nport = \"five thousand\"\n").unwrap();

    let err = PitchConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
