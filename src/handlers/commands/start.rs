//! Start command handler

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, Bot};
use tracing::debug;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Handle /start command - reply with the configured welcome message.
/// Stateless: the only failure mode is the reply call itself.
pub async fn handle_start(bot: Bot, msg: Message, settings: Arc<Settings>) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "Processing /start command");
    bot.send_message(msg.chat.id, settings.messages.welcome.clone())
        .await?;
    Ok(())
}
