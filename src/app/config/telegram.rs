//! Telegram bot configuration.

use serde::Deserialize;

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Telegram configuration.
///
/// The bot token is never read from the config file; it comes from
/// `TELEGRAM_BOT_TOKEN`.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Run the Telegram bot when `gdps run` starts.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Chats allowed to issue commands. Empty allows every chat.
    #[serde(default)]
    pub allowed_chats: Vec<i64>,
    /// Register the command menu with Telegram on startup.
    #[serde(default = "default_true")]
    pub register_commands: bool,
    /// Bot token, loaded from the environment.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl TelegramAppConfig {
    /// Whether `chat_id` may issue commands.
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_chats: Vec::new(),
            register_commands: true,
            bot_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allow_list_allows_everyone() {
        let config = TelegramAppConfig::default();
        assert!(config.is_allowed(1));
        assert!(config.is_allowed(-100));
    }

    #[test]
    fn allow_list_restricts_chats() {
        let config = TelegramAppConfig {
            allowed_chats: vec![42],
            ..Default::default()
        };
        assert!(config.is_allowed(42));
        assert!(!config.is_allowed(7));
    }
}
