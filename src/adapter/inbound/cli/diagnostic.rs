//! Miette diagnostics for fatal CLI errors.
//!
//! Config parse errors are shown against the offending file with the span
//! toml reports. Other errors get a code and, where there is an obvious
//! next step, a help line.

use std::fmt::Display;
use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::app::config::DEFAULT_CONFIG_FILE;
use crate::error::{ConfigError, DispatchError, Error, ResolveError, StoreError};

/// Configuration parse error with the file content attached.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(gdps::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

/// Any other fatal error, coded by the layer it came from.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandDiagnostic {
    pub message: String,
    pub code: &'static str,
    pub help: Option<String>,
}

impl Diagnostic for CommandDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

/// Turn a fatal error into a printable report.
///
/// `config_path` is the file passed with `--config`, if any; it is re-read
/// to show the source of TOML parse errors.
#[must_use]
pub fn report(error: Error, config_path: Option<&Path>) -> miette::Report {
    if let Error::Config(ConfigError::Parse(ref parse)) = error {
        let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if let Ok(content) = std::fs::read_to_string(path) {
            return ConfigDiagnostic {
                message: parse.message().to_string(),
                src: NamedSource::new(path.display().to_string(), content),
                span: parse.span().map(SourceSpan::from),
                help: Some("fix the TOML syntax and try again".into()),
            }
            .into();
        }
    }

    CommandDiagnostic {
        message: error.to_string(),
        code: code_for(&error),
        help: help_for(&error),
    }
    .into()
}

fn code_for(error: &Error) -> &'static str {
    match error {
        Error::Config(_) => "gdps::config",
        Error::Store(_) => "gdps::store",
        Error::Dispatch(_) => "gdps::dispatch",
        Error::Telegram(_) => "gdps::telegram",
        Error::Json(_) => "gdps::json",
    }
}

fn help_for(error: &Error) -> Option<String> {
    let store = match error {
        Error::Store(e) => e,
        Error::Dispatch(DispatchError::Handler { source, .. }) => source,
        Error::Dispatch(DispatchError::Resolve(ResolveError::Construction { source, .. })) => source,
        Error::Config(ConfigError::ReadFile(_)) => {
            return Some("pass an existing file with --config".into())
        }
        Error::Telegram(_) => {
            return Some("set TELEGRAM_BOT_TOKEN or disable [telegram] in the config".into())
        }
        _ => return None,
    };

    match store {
        StoreError::Connection { .. } => Some("run `gdps install` to create the database".into()),
        StoreError::Query(e) if e.to_string().contains("no such table") => {
            Some("run `gdps install` to create the schema".into())
        }
        StoreError::UnknownTable(_) => Some("known tables: offenders, citations".into()),
        StoreError::UnknownOperator(_) => Some("use one of =, !=, <, <=, >, >=, LIKE".into()),
        _ => None,
    }
}
