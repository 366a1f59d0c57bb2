use crate::app::command::Command;
use crate::error::StoreError;

use super::Handler;

/// Bot commands for the Telegram menu, as `(command, description)`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("citation", "Cite an offender: <name> <note>"),
        ("offender", "Look up, add, list or remove offenders"),
        ("roe", "Show the rules of engagement"),
        ("help", "Show all commands"),
    ]
}

/// Help text listing every command with the configured prefix.
#[must_use]
pub fn command_help(prefix: &str) -> String {
    [
        "📋 Commands".to_string(),
        String::new(),
        format!("{prefix}citation <name> <note> - Cite an offender (recorded if new)"),
        format!("{prefix}citation remove <id> - Remove a citation"),
        format!("{prefix}offender <name> - Show an offender and their citations"),
        format!("{prefix}offender add <name> [alliance] - Record an offender"),
        format!("{prefix}offender remove <name> - Remove an offender and their citations"),
        format!("{prefix}offender list - List all offenders"),
        format!("{prefix}roe - Rules of engagement"),
        format!("{prefix}help - This message"),
        String::new(),
        "Offender names cannot be the words add, remove or list.".to_string(),
    ]
    .join("\n")
}

/// Answers `help`.
pub struct HelpHandler {
    prefix: String,
}

impl HelpHandler {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Handler for HelpHandler {
    fn run(&mut self, _command: &Command) -> Result<Option<String>, StoreError> {
        Ok(Some(command_help(&self.prefix)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_uses_prefix() {
        let text = command_help("!");
        assert!(text.contains("!citation <name> <note>"));
        assert!(text.contains("!offender list"));
        assert!(!text.contains("/roe"));
    }

    #[test]
    fn help_names_reserved_words() {
        let text = command_help("/");
        for word in crate::app::handler::RESERVED_NAMES {
            assert!(text.contains(word), "missing {word}");
        }
        assert!(text.contains("cannot be the words"));
    }

    #[test]
    fn menu_commands_appear_in_help() {
        let help = command_help("/");
        for (command, description) in bot_commands() {
            assert!(help.contains(&format!("/{command}")), "missing {command}");
            assert!(!description.is_empty());
        }
    }

    #[test]
    fn handler_always_replies() {
        let mut handler = HelpHandler::new("/");
        let reply = handler.run(&Command::new("help", Vec::<String>::new())).unwrap();
        assert_eq!(reply, Some(command_help("/")));
    }
}
