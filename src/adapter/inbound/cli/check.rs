//! Handler for the `check` command.

use crate::adapter::inbound::cli::command::ConfigArg;
use crate::adapter::inbound::cli::output;
use crate::app::config::TOKEN_ENV;
use crate::app::Config;
use crate::error::Result;

/// Validate configuration without starting the bot.
pub fn execute(args: &ConfigArg) -> Result<()> {
    let config = Config::discover(args.config.as_deref())?;

    output::section("Configuration Check");
    match &args.config {
        Some(path) => output::field("Config", path.display()),
        None => output::field("Config", "defaults / ./config.toml"),
    }
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Database", config.database.path.display());
    output::field("Prefix", &config.bot.prefix);
    output::field("Log level", &config.logging.level);
    if output::verbosity() > 0 {
        output::field("Log format", &config.logging.format);
    }

    if config.database.path.exists() {
        output::success("Database file present");
    } else {
        output::warning("Database file missing (run `gdps install`)");
    }

    check_telegram(&config);
    output::success("Configuration check complete");
    Ok(())
}

fn check_telegram(config: &Config) {
    let telegram = &config.telegram;
    if !telegram.enabled {
        output::field("Telegram", "disabled");
        return;
    }
    if !cfg!(feature = "telegram") {
        output::warning("Telegram enabled but this build lacks the `telegram` feature");
        return;
    }

    if telegram.bot_token.is_some() {
        output::success("Telegram integration configured");
    } else {
        output::warning("Telegram enabled but the bot token is missing");
        output::field("Missing", TOKEN_ENV);
    }

    if telegram.allowed_chats.is_empty() {
        output::field("Chats", "all");
    } else {
        let chats: Vec<String> = telegram.allowed_chats.iter().map(i64::to_string).collect();
        output::field("Chats", chats.join(", "));
    }
}
