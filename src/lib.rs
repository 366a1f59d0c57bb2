//! gdps - a chat bot that keeps a ledger of offenders and their citations.
//!
//! Alliance members report misbehaving players with `/citation <name>
//! <note>`; the bot stores offenders and citations in SQLite and answers
//! lookups, listings and the alliance's rules of engagement.
//!
//! # Modules
//!
//! - [`adapter::outbound::sqlite`] - schema installation and the per-table
//!   [`RecordStore`](adapter::outbound::sqlite::RecordStore)
//! - [`app::container`] - registry of components and command dispatch
//! - [`app::handler`] - the `citation`, `offender`, `help` and `roe` commands
//! - [`app::bot`] - chat authorization and reply logic
//! - [`adapter::inbound`] - the `gdps` CLI and the Telegram transport
//!   (requires the `telegram` feature)
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use gdps::adapter::outbound::sqlite::install;
//! use gdps::app::{Command, Container};
//! use std::path::Path;
//!
//! let path = Path::new("database/gdps.db");
//! install(path).unwrap();
//!
//! let container = Container::new(path, "/", "Be nice.");
//! let reply = container.dispatch(&Command::new("roe", Vec::<String>::new())).unwrap();
//! assert_eq!(reply.as_deref(), Some("Be nice."));
//! ```

pub mod adapter;
pub mod app;
pub mod error;
