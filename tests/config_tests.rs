//! Configuration loading, environment overrides and validation.

use std::path::PathBuf;
use std::sync::Mutex;

use gdps::app::config::{DATABASE_PATH_ENV, TOKEN_ENV};
use gdps::app::Config;
use gdps::error::{ConfigError, Error};

/// Serializes tests that touch process environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    std::env::remove_var(DATABASE_PATH_ENV);
    std::env::remove_var(TOKEN_ENV);
}

#[test]
fn defaults_apply_without_a_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = Config::parse("").unwrap();
    assert_eq!(config.database.path, PathBuf::from("database/gdps.db"));
    assert_eq!(config.bot.prefix, "/");
    assert_eq!(config.logging.format, "pretty");
    assert!(config.telegram.bot_token.is_none());
}

#[test]
fn load_reads_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("gdps.toml");
    std::fs::write(
        &path,
        "[database]\npath = \"/var/lib/gdps/gdps.db\"\n\n[bot]\nprefix = \"!\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.database.path, PathBuf::from("/var/lib/gdps/gdps.db"));
    assert_eq!(config.bot.prefix, "!");
}

#[test]
fn environment_overrides_database_path_and_token() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    std::env::set_var(DATABASE_PATH_ENV, "/tmp/override.db");
    std::env::set_var(TOKEN_ENV, "123:abc");

    let config = Config::parse("[database]\npath = \"file.db\"\n").unwrap();
    clear_env();

    assert_eq!(config.database.path, PathBuf::from("/tmp/override.db"));
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
}

#[test]
fn blank_token_is_ignored() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    std::env::set_var(TOKEN_ENV, "   ");

    let config = Config::parse("").unwrap();
    clear_env();

    assert!(config.telegram.bot_token.is_none());
}

#[test]
fn invalid_values_are_rejected() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    assert!(matches!(
        Config::parse("[bot]\nprefix = \"/ \"\n"),
        Err(Error::Config(ConfigError::InvalidValue { field: "bot.prefix", .. }))
    ));
    assert!(matches!(
        Config::parse("[database]\npath = \"\"\n"),
        Err(Error::Config(ConfigError::MissingField { field: "database.path" }))
    ));
    assert!(matches!(
        Config::parse("[logging]\nformat = \"xml\"\n"),
        Err(Error::Config(ConfigError::InvalidValue { field: "logging.format", .. }))
    ));
}

#[test]
fn discover_with_explicit_missing_file_fails() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let result = Config::discover(Some(std::path::Path::new("/nonexistent/gdps.toml")));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
