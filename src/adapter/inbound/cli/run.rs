//! Handler for the `run` command.

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{install, output};
use crate::adapter::outbound::sqlite;
use crate::app::{Bot, Config};
use crate::error::{Error, Result};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::discover(args.config.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".into();
    }
    config.init_logging();

    if !output::is_quiet() {
        output::header(env!("CARGO_PKG_VERSION"));
    }
    let report = sqlite::install(&config.database.path)?;
    install::print_report(&report);

    info!(
        database = %config.database.path.display(),
        prefix = %config.bot.prefix,
        "gdps starting"
    );

    if !config.telegram.enabled {
        output::warning("Telegram is disabled; nothing to serve");
        return Ok(());
    }

    serve(config).await
}

#[cfg(feature = "telegram")]
async fn serve(config: Config) -> Result<()> {
    use crate::adapter::inbound::telegram;

    let token = config
        .telegram
        .bot_token
        .clone()
        .ok_or_else(|| Error::Telegram(format!("{} is not set", crate::app::config::TOKEN_ENV)))?;
    let register_commands = config.telegram.register_commands;
    let bot = Bot::from_config(&config);

    output::success("Listening for chat commands (Ctrl-C to stop)");
    telegram::serve(&token, bot, register_commands).await;
    info!("gdps stopped");
    Ok(())
}

#[cfg(not(feature = "telegram"))]
async fn serve(config: Config) -> Result<()> {
    let _ = Bot::from_config(&config);
    Err(Error::Telegram(
        "this build does not include the `telegram` feature".into(),
    ))
}
