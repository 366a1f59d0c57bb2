//! Chat-facing bot logic.
//!
//! Turns an incoming chat message into an optional reply. The transport
//! (Telegram) only moves text in and out; everything decided here can be
//! exercised without a network.

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::app::command::{Command, CommandParseError};
use crate::app::config::{Config, TelegramAppConfig};
use crate::app::container::Container;
use crate::app::format::{fit_reply, MESSAGE_LIMIT};
use crate::error::DispatchError;

/// Authorizes chats, parses commands and dispatches them one at a time.
pub struct Bot {
    container: Container,
    telegram: TelegramAppConfig,
    prefix: String,
    dispatch_lock: Mutex<()>,
}

impl Bot {
    #[must_use]
    pub fn new(container: Container, telegram: TelegramAppConfig, prefix: impl Into<String>) -> Self {
        Self {
            container,
            telegram,
            prefix: prefix.into(),
            dispatch_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Container::from_config(config),
            config.telegram.clone(),
            config.bot.prefix.clone(),
        )
    }

    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Reply for `text` sent from `chat_id`, if any.
    ///
    /// Returns `None` for unauthorized chats, plain messages, unknown
    /// commands and failed dispatches. Failures are logged, never sent back.
    /// Replies longer than one Telegram message are cut to fit.
    pub fn reply_for_message(&self, text: &str, chat_id: i64, author: Option<&str>) -> Option<String> {
        if !self.telegram.is_allowed(chat_id) {
            warn!(chat_id, "Ignoring message from unauthorized chat");
            return None;
        }

        let command = match Command::parse(text, &self.prefix) {
            Ok(command) => command.with_chat(chat_id),
            Err(CommandParseError::NotACommand) => return None,
            Err(e) => {
                debug!(chat_id, error = %e, "Ignoring malformed command");
                return None;
            }
        };
        let command = match author {
            Some(author) => command.with_author(author),
            None => command,
        };

        let _guard = self.dispatch_lock.lock();
        match self.container.dispatch(&command) {
            Ok(reply) => reply.map(|reply| fit_reply(&reply, MESSAGE_LIMIT)),
            Err(e) if e.is_unknown_command() => {
                debug!(command = %command.name, "No handler for command");
                None
            }
            Err(e @ DispatchError::Resolve(_)) => {
                error!(command = %command.name, error = %e, "Failed to build command handler");
                None
            }
            Err(e) => {
                error!(command = %command.name, error = %e, "Command failed");
                None
            }
        }
    }
}
