//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Grievance tracker for game alliances: offenders, citations and rules of
/// engagement over chat.
#[derive(Parser, Debug)]
#[command(name = "gdps")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database file and install the schema
    Install(ConfigArg),

    /// Install the schema, then serve chat commands until Ctrl-C
    Run(RunArgs),

    /// Dispatch one command locally and print the reply
    Dispatch(DispatchArgs),

    /// List stored rows of a table
    Records(RecordsArgs),

    /// Validate configuration without starting the bot
    Check(ConfigArg),
}

/// Shared `--config` option.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArg {
    /// Path to the configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `gdps run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArg,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `gdps dispatch`.
#[derive(Args, Debug)]
pub struct DispatchArgs {
    #[command(flatten)]
    pub config: ConfigArg,

    /// Command text, with or without the prefix (e.g. `citation Alice spam`)
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

/// Arguments for `gdps records`.
#[derive(Args, Debug)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub config: ConfigArg,

    /// Table to list (`offenders` or `citations`)
    pub table: String,

    /// Column to filter on
    #[arg(long, requires = "value")]
    pub column: Option<String>,

    /// Value the column is compared against
    #[arg(long, requires = "column")]
    pub value: Option<String>,

    /// Comparison operator (=, !=, <, <=, >, >=, LIKE); defaults to =
    #[arg(long, requires = "column")]
    pub operator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gdps", "install", "--json", "-c", "gdps.toml"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Install(arg) => {
                assert_eq!(arg.config, Some(PathBuf::from("gdps.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn dispatch_collects_text() {
        let cli = Cli::try_parse_from(["gdps", "dispatch", "citation", "Alice", "spam"]).unwrap();
        match cli.command {
            Commands::Dispatch(args) => assert_eq!(args.text, vec!["citation", "Alice", "spam"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn records_filter_needs_column_and_value() {
        assert!(Cli::try_parse_from(["gdps", "records", "offenders", "--column", "name"]).is_err());

        let cli = Cli::try_parse_from([
            "gdps", "records", "offenders", "--column", "name", "--value", "Alice",
        ])
        .unwrap();
        match cli.command {
            Commands::Records(args) => {
                assert_eq!(args.table, "offenders");
                assert_eq!(args.value.as_deref(), Some("Alice"));
                assert_eq!(args.operator, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::try_parse_from(["gdps", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
