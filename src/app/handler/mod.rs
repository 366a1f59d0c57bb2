//! Command handlers.
//!
//! Each handler answers one registered command name. Storage errors are
//! returned as-is; handlers only translate the failures users can act on
//! (a duplicate name, a missing record) into reply text.

use crate::app::command::Command;
use crate::error::StoreError;

mod citation;
mod help;
mod offender;
mod roe;

pub use citation::CitationHandler;
pub use help::{bot_commands, command_help, HelpHandler};
pub use offender::OffenderHandler;
pub use roe::RoeHandler;

/// Subcommand words. An offender with one of these names could never be
/// shown or removed, so they are refused as names.
pub const RESERVED_NAMES: [&str; 3] = ["add", "remove", "list"];

fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

fn reserved_name_reply(name: &str) -> String {
    format!("`{name}` is a reserved word and cannot be an offender name.")
}

/// A runnable command target.
pub trait Handler: Send {
    /// Handle `command` and return reply text, or `None` for no reply.
    ///
    /// # Errors
    /// Returns storage errors unchanged.
    fn run(&mut self, command: &Command) -> Result<Option<String>, StoreError>;
}
