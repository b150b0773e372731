//! Help command handler

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, Bot};

use crate::config::Settings;
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message, settings: Arc<Settings>) -> Result<()> {
    bot.send_message(msg.chat.id, settings.messages.help.clone())
        .await?;
    Ok(())
}
