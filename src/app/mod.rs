//! Application layer - configuration, command dispatch and handlers.

pub mod bot;
pub mod command;
pub mod config;
pub mod container;
pub mod format;
pub mod handler;

pub use bot::Bot;
pub use command::{Command, CommandParseError};
pub use config::{BotConfig, Config, DatabaseConfig, LoggingConfig, TelegramAppConfig};
pub use container::{capitalize, Component, Container};
