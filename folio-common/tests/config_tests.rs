//! Configuration resolution tests
//!
//! Uses serial_test: these tests mutate DATABASE_URL / FOLIO_CONFIG and must
//! not run in parallel with each other.

use folio_common::config::{TomlConfig, CONFIG_ENV_VAR, DATABASE_URL_ENV_VAR};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_cli_database_url_wins() {
    env::set_var(DATABASE_URL_ENV_VAR, "sqlite:///tmp/from-env.db");
    let config = TomlConfig {
        database_url: Some("sqlite:///tmp/from-toml.db".to_string()),
        ..Default::default()
    };

    assert_eq!(
        config.database_url(Some("sqlite:///tmp/from-cli.db")),
        "sqlite:///tmp/from-cli.db"
    );

    env::remove_var(DATABASE_URL_ENV_VAR);
}

#[test]
#[serial]
fn test_env_database_url_beats_toml() {
    env::set_var(DATABASE_URL_ENV_VAR, "sqlite:///tmp/from-env.db");
    let config = TomlConfig {
        database_url: Some("sqlite:///tmp/from-toml.db".to_string()),
        ..Default::default()
    };

    assert_eq!(config.database_url(None), "sqlite:///tmp/from-env.db");

    env::remove_var(DATABASE_URL_ENV_VAR);
}

#[test]
#[serial]
fn test_toml_database_url_used_without_env() {
    env::remove_var(DATABASE_URL_ENV_VAR);
    let config = TomlConfig {
        database_url: Some("sqlite:///tmp/from-toml.db".to_string()),
        ..Default::default()
    };

    assert_eq!(config.database_url(None), "sqlite:///tmp/from-toml.db");
}

#[test]
#[serial]
fn test_default_database_url_in_data_dir() {
    env::remove_var(DATABASE_URL_ENV_VAR);
    let config = TomlConfig {
        data_dir: Some(PathBuf::from("/srv/folio")),
        ..Default::default()
    };

    assert_eq!(config.database_url(None), "sqlite:///srv/folio/folio.db");
}

#[test]
#[serial]
fn test_blank_cli_value_falls_through() {
    env::remove_var(DATABASE_URL_ENV_VAR);
    let config = TomlConfig {
        database_url: Some("sqlite:///tmp/from-toml.db".to_string()),
        ..Default::default()
    };

    assert_eq!(config.database_url(Some("  ")), "sqlite:///tmp/from-toml.db");
}

#[test]
#[serial]
fn test_config_file_from_env_var() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(&path, "[seed]\nbatch_size = 25\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let config = TomlConfig::resolve(None).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.seed.batch_size, 25);
    assert_eq!(config.seed.batch_delay_ms, 50);
}

#[test]
#[serial]
fn test_explicit_missing_config_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let result = TomlConfig::resolve(Some(&PathBuf::from("/nonexistent/folio/config.toml")));
    assert!(result.is_err());
}
