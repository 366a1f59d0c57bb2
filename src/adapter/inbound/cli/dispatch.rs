//! Handler for the `dispatch` command.
//!
//! Runs one command through the container without a chat platform, which
//! is also the quickest way to exercise the handlers by hand.

use crate::adapter::inbound::cli::command::DispatchArgs;
use crate::adapter::inbound::cli::output;
use crate::app::{Command, CommandParseError, Config, Container};
use crate::error::Result;

/// Execute the dispatch command.
pub fn execute(args: &DispatchArgs) -> Result<()> {
    let config = Config::discover(args.config.config.as_deref())?;
    let container = Container::from_config(&config);

    let text = args.text.join(" ");
    let command = match command_for(&text, &config.bot.prefix) {
        Some(command) => command,
        None => {
            output::warning(&format!("`{text}` is not a command"));
            return Ok(());
        }
    };

    match container.dispatch(&command) {
        Ok(Some(reply)) => output::reply(&reply),
        Ok(None) => output::hint("command produced no reply"),
        Err(e) if e.is_unknown_command() => {
            output::warning(&format!("unknown command `{}`", command.name));
            output::hint(&format!(
                "run {} for the command list",
                output::highlight("gdps dispatch help")
            ));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Parse `text`, accepting it with or without the chat prefix.
fn command_for(text: &str, prefix: &str) -> Option<Command> {
    match Command::parse(text, prefix) {
        Ok(command) => Some(command),
        Err(CommandParseError::NotACommand) => {
            Command::parse(&format!("{prefix}{}", text.trim_start()), prefix).ok()
        }
        Err(CommandParseError::EmptyName) => None,
    }
}
