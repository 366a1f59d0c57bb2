//! Inbound chat commands.
//!
//! A [`Command`] is what the container dispatches: a name plus the
//! whitespace-separated arguments that followed it, and where it came from.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Command {
    /// Command name as typed, without prefix or `@bot` suffix.
    pub name: String,
    /// Arguments following the command name.
    #[serde(default)]
    pub args: Vec<String>,
    /// Chat the command was sent from, when known.
    #[serde(default)]
    pub chat_id: Option<i64>,
    /// Display name of the sender, when known.
    #[serde(default)]
    pub author: Option<String>,
}

/// Why a message did not yield a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    EmptyName,
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::EmptyName => write!(f, "command name is empty"),
        }
    }
}

impl std::error::Error for CommandParseError {}

impl Command {
    /// Build a command from a name and arguments.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            chat_id: None,
            author: None,
        }
    }

    /// Parse a chat message such as `/citation Alice spam`.
    ///
    /// The first word must start with `prefix`. A trailing `@botname` on the
    /// command word is dropped.
    ///
    /// # Errors
    /// Returns [`CommandParseError::NotACommand`] for ordinary messages and
    /// [`CommandParseError::EmptyName`] for a bare prefix.
    pub fn parse(text: &str, prefix: &str) -> Result<Self, CommandParseError> {
        let mut parts = text.split_whitespace();
        let Some(raw_command) = parts.next() else {
            return Err(CommandParseError::NotACommand);
        };
        let Some(raw_name) = raw_command.strip_prefix(prefix) else {
            return Err(CommandParseError::NotACommand);
        };

        let name = raw_name.split_once('@').map_or(raw_name, |(head, _)| head);
        if name.is_empty() {
            return Err(CommandParseError::EmptyName);
        }

        Ok(Self::new(name, parts))
    }

    /// Build a command from a JSON object like `{"name": "roe", "args": []}`.
    ///
    /// A missing or non-string `name` becomes the empty name, which no
    /// registry entry matches. Non-string arguments are skipped.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        let name = value
            .get("name")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let args: Vec<String> = value
            .get("args")
            .and_then(JsonValue::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: name.to_string(),
            args,
            chat_id: value.get("chat_id").and_then(JsonValue::as_i64),
            author: value
                .get("author")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
        }
    }

    #[must_use]
    pub fn with_chat(mut self, chat_id: i64) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Arguments from `index` on, joined by single spaces.
    #[must_use]
    pub fn rest(&self, index: usize) -> String {
        self.args.get(index..).unwrap_or_default().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_name_and_args() {
        let command = Command::parse("/citation Alice spam in chat", "/").unwrap();
        assert_eq!(command.name, "citation");
        assert_eq!(command.args, vec!["Alice", "spam", "in", "chat"]);
    }

    #[test]
    fn parse_strips_bot_mention() {
        let command = Command::parse("/roe@gdps_bot", "/").unwrap();
        assert_eq!(command.name, "roe");
        assert!(command.args.is_empty());
    }

    #[test]
    fn parse_custom_prefix() {
        let command = Command::parse("!offender Bob", "!").unwrap();
        assert_eq!(command.name, "offender");
        assert_eq!(command.arg(0), Some("Bob"));
        assert!(matches!(
            Command::parse("/offender Bob", "!"),
            Err(CommandParseError::NotACommand)
        ));
    }

    #[test]
    fn parse_keeps_case() {
        assert_eq!(Command::parse("/CITATION", "/").unwrap().name, "CITATION");
    }

    #[test]
    fn parse_rejects_plain_text() {
        assert_eq!(
            Command::parse("hello there", "/"),
            Err(CommandParseError::NotACommand)
        );
        assert_eq!(Command::parse("   ", "/"), Err(CommandParseError::NotACommand));
        assert_eq!(Command::parse("", "/"), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn parse_rejects_bare_prefix() {
        assert_eq!(Command::parse("/", "/"), Err(CommandParseError::EmptyName));
        assert_eq!(
            Command::parse("/@bot", "/"),
            Err(CommandParseError::EmptyName)
        );
    }

    #[test]
    fn parse_tolerates_extra_whitespace() {
        let command = Command::parse("  /citation\tAlice   spam ", "/").unwrap();
        assert_eq!(command.args, vec!["Alice", "spam"]);
    }

    #[test]
    fn rest_joins_tail() {
        let command = Command::new("citation", ["Alice", "spam", "again"]);
        assert_eq!(command.rest(1), "spam again");
        assert_eq!(command.rest(5), "");
    }

    #[test]
    fn from_json_reads_fields() {
        let command = Command::from_json(&json!({
            "name": "offender",
            "args": ["Alice", 3, "Red"],
            "chat_id": 12,
            "author": "mod",
        }));
        assert_eq!(command.name, "offender");
        assert_eq!(command.args, vec!["Alice", "Red"]);
        assert_eq!(command.chat_id, Some(12));
        assert_eq!(command.author.as_deref(), Some("mod"));
    }

    #[test]
    fn from_json_non_string_name_is_empty() {
        assert_eq!(Command::from_json(&json!({ "name": 42 })).name, "");
        assert_eq!(Command::from_json(&json!({})).name, "");
    }
}
