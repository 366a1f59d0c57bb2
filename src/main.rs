use clap::Parser;
use tracing::info;

use gdps::adapter::inbound::cli::command::{Cli, Commands};
use gdps::adapter::inbound::cli::{diagnostic, execute};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = match &cli.command {
        Commands::Install(args) | Commands::Check(args) => args.config.clone(),
        Commands::Run(args) => args.config.config.clone(),
        Commands::Dispatch(args) => args.config.config.clone(),
        Commands::Records(args) => args.config.config.clone(),
    };

    tokio::select! {
        result = execute(cli) => {
            if let Err(e) = result {
                eprintln!("{:?}", diagnostic::report(e, config_path.as_deref()));
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
}
