//! CLI module graph.

pub mod check;
pub mod command;
pub mod diagnostic;
pub mod dispatch;
pub mod install;
pub mod output;
pub mod records;
pub mod run;

use command::{Cli, Commands};
use output::OutputConfig;

use crate::error::Result;

/// Run the parsed command line to completion.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Install(args) => install::execute(&args),
        Commands::Run(args) => run::execute(&args).await,
        Commands::Dispatch(args) => dispatch::execute(&args),
        Commands::Records(args) => records::execute(&args),
        Commands::Check(args) => check::execute(&args),
    }
}
