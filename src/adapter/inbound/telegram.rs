//! Telegram transport for the chat bot.
//!
//! Receives messages through a long-polling `teloxide::repl`, hands the
//! text to [`Bot::reply_for_message`] on the blocking pool and sends any
//! reply back to the originating chat.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use crate::app::handler::bot_commands;
use crate::app::Bot as CommandBot;

/// Serve chat commands until Ctrl-C.
pub async fn serve(token: &str, bot: CommandBot, register_commands: bool) {
    let telegram = teloxide::Bot::new(token);
    let bot = Arc::new(bot);

    if register_commands {
        if let Err(e) = register_bot_commands(&telegram).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }
    }

    info!("Telegram command listener started");

    teloxide::repl(telegram, move |telegram: teloxide::Bot, msg: Message| {
        let bot = Arc::clone(&bot);
        async move {
            let Some(text) = msg.text().map(str::to_string) else {
                return respond(());
            };
            let chat_id = msg.chat.id;
            let author = msg.from.as_ref().map(|user| user.full_name());

            let reply = tokio::task::spawn_blocking(move || {
                bot.reply_for_message(&text, chat_id.0, author.as_deref())
            })
            .await;

            match reply {
                Ok(Some(reply)) => {
                    if let Err(e) = telegram.send_message(chat_id, reply).await {
                        error!(error = %e, "Failed to send Telegram command response");
                    }
                }
                Ok(None) => {}
                Err(e) => error!(error = %e, "Command task failed"),
            }

            respond(())
        }
    })
    .await;
}

/// Register the command menu shown under "/".
async fn register_bot_commands(telegram: &teloxide::Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(command, description)| BotCommand::new(command, description))
        .collect();

    telegram.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
