//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for the database location and for secrets like
//! `TELEGRAM_BOT_TOKEN`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

mod logging;
mod telegram;

pub use logging::LoggingConfig;
pub use telegram::{TelegramAppConfig, TOKEN_ENV};

/// Environment variable overriding `database.path`.
pub const DATABASE_PATH_ENV: &str = "GDPS_DATABASE_PATH";

/// Config file looked up when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Rules of engagement shown by `/roe` when none are configured.
pub const DEFAULT_ROE: &str = "Rules of Engagement\n\
    1. Do not attack members of allied alliances.\n\
    2. Do not hit players more than 5 levels below you.\n\
    3. Report violations with /citation <name> <what happened>.\n\
    4. Three citations and an offender is fair game.";

/// Database settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("database/gdps.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Chat-facing bot settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Prefix that marks a message as a command.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Rules-of-engagement text returned by the `roe` command.
    #[serde(default = "default_roe")]
    pub roe: String,
}

fn default_prefix() -> String {
    "/".into()
}

fn default_roe() -> String {
    DEFAULT_ROE.into()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            roe: default_roe(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

impl Config {
    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Load `path` when given, otherwise `config.toml` if present, otherwise
    /// defaults. Environment overrides apply in every case.
    ///
    /// # Errors
    /// Returns an error if an explicitly given file is missing or invalid.
    #[allow(clippy::result_large_err)]
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => {
                let mut config = Self::default();
                config.apply_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse configuration from TOML text and apply environment overrides.
    ///
    /// # Errors
    /// Returns an error if the text cannot be parsed or fails validation.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(path) = std::env::var(DATABASE_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            self.database.path = PathBuf::from(path);
        }
        // Secrets never come from the config file.
        self.telegram.bot_token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty());
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }
        if self.bot.prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bot.prefix",
                reason: "prefix cannot be empty".into(),
            }
            .into());
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "bot.prefix",
                reason: "prefix cannot contain whitespace".into(),
            }
            .into());
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
