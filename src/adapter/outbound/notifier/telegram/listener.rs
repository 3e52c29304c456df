//! Inbound Telegram command listener.

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use super::command::bot_commands;
use super::control::TelegramControl;

/// Handle inbound bot commands until the task is aborted.
///
/// Registers the command menu and looks up the bot's own username first;
/// either failure is logged and the listener still starts.
pub async fn run_command_listener(bot: Bot, mut control: TelegramControl) {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = me.user.username.as_deref() {
                control = control.with_bot_username(username);
            }
        }
        Err(e) => warn!(error = %e, "Failed to look up bot username; accepting any @mention"),
    }

    info!("Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let control = control.clone();
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            if let Some(response) = control.respond(text, msg.chat.id).await {
                if let Err(e) = bot.send_message(msg.chat.id, response).await {
                    error!(error = %e, "Failed to send Telegram command response");
                }
            }

            respond(())
        }
    })
    .await;

    warn!("Telegram command listener stopped");
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
