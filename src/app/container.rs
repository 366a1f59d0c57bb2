//! Command container.
//!
//! Maps capitalized component names to what they construct and dispatches
//! chat commands to the matching handler. Handlers are built fresh for
//! every dispatch, each opening its own store connections.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::adapter::outbound::sqlite::{RecordStore, StoreOptions};
use crate::app::command::Command;
use crate::app::config::Config;
use crate::app::handler::{CitationHandler, Handler, HelpHandler, OffenderHandler, RoeHandler};
use crate::error::{DispatchError, ResolveError, StoreError};

/// Everything registered in the container, keyed by its capitalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Bot,
    Command,
    Citation,
    Offender,
    Help,
    Roe,
    Telegram,
    Database,
}

impl Component {
    pub const ALL: [Component; 8] = [
        Component::Bot,
        Component::Command,
        Component::Citation,
        Component::Offender,
        Component::Help,
        Component::Roe,
        Component::Telegram,
        Component::Database,
    ];

    /// Registry key, matched exactly.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bot => "Bot",
            Self::Command => "Command",
            Self::Citation => "Citation",
            Self::Offender => "Offender",
            Self::Help => "Help",
            Self::Roe => "Roe",
            Self::Telegram => "Telegram",
            Self::Database => "Database",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Whether the component answers chat commands.
    #[must_use]
    pub const fn is_handler(self) -> bool {
        matches!(
            self,
            Self::Citation | Self::Offender | Self::Help | Self::Roe
        )
    }
}

/// Upper-case the first character of `text`, leaving the rest untouched.
///
/// Non-text input (`None`) and the empty string both give `""`.
#[must_use]
pub fn capitalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Registry and dispatcher for chat commands.
#[derive(Debug, Clone)]
pub struct Container {
    database: PathBuf,
    prefix: String,
    roe: String,
}

impl Container {
    #[must_use]
    pub fn new(
        database: impl Into<PathBuf>,
        prefix: impl Into<String>,
        roe: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            prefix: prefix.into(),
            roe: roe.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.database.path.clone(),
            config.bot.prefix.clone(),
            config.bot.roe.clone(),
        )
    }

    /// Database file every store opened by the container points at.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.database
    }

    /// Command prefix handlers use in usage text.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True iff `name` is a registered key.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        Component::from_key(name).is_some()
    }

    /// Open a fresh store on the container's database.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be opened.
    pub fn database(&self, options: StoreOptions) -> Result<RecordStore, StoreError> {
        RecordStore::open(&self.database, options)
    }

    /// Construct the handler registered under `name`.
    ///
    /// Failures are logged here and returned to the caller.
    ///
    /// # Errors
    /// [`ResolveError::NotFound`] for unregistered names,
    /// [`ResolveError::NotAHandler`] for components that do not run commands,
    /// [`ResolveError::Construction`] when a handler's stores cannot open.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Handler>, ResolveError> {
        let result = match Component::from_key(name) {
            None => Err(ResolveError::NotFound(name.to_string())),
            Some(component) => self.construct(component),
        };

        if let Err(ref e) = result {
            match e {
                ResolveError::NotFound(_) => debug!(name, "Error accessing component from container"),
                _ => error!(name, error = %e, "Error accessing component from container"),
            }
        }
        result
    }

    fn construct(&self, component: Component) -> Result<Box<dyn Handler>, ResolveError> {
        let construction = |source| ResolveError::Construction {
            name: component.key().to_string(),
            source,
        };

        match component {
            Component::Help => Ok(Box::new(HelpHandler::new(self.prefix.clone()))),
            Component::Roe => Ok(Box::new(RoeHandler::new(self.roe.clone()))),
            Component::Citation => CitationHandler::open(&self.database, self.prefix.clone())
                .map(|h| Box::new(h) as Box<dyn Handler>)
                .map_err(construction),
            Component::Offender => OffenderHandler::open(&self.database, self.prefix.clone())
                .map(|h| Box::new(h) as Box<dyn Handler>)
                .map_err(construction),
            Component::Bot | Component::Command | Component::Telegram | Component::Database => {
                Err(ResolveError::NotAHandler(component.key().to_string()))
            }
        }
    }

    /// Run `command` through the handler registered under its capitalized name.
    ///
    /// Only the first character of the name is normalized, so `citation`
    /// reaches `Citation` while `CITATION` does not.
    ///
    /// # Errors
    /// Resolution failures (including unknown names) and handler storage
    /// errors.
    pub fn dispatch(&self, command: &Command) -> Result<Option<String>, DispatchError> {
        let name = capitalize(command.name.as_str());
        if !self.exists(&name) {
            debug!(command = %command.name, "Ignoring unregistered command");
            return Err(ResolveError::NotFound(name).into());
        }

        let mut handler = self.resolve(&name)?;
        info!(
            command = %name,
            args = command.args.len(),
            chat_id = ?command.chat_id,
            "Dispatching command"
        );

        handler.run(command).map_err(|source| DispatchError::Handler {
            command: name,
            source,
        })
    }
}
