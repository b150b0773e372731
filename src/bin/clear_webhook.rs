//! Webhook cleanup utility
//!
//! Clears a stale webhook registration so the bot can run in polling mode
//! without delivery conflicts. Prints the current registration, deletes
//! it, and verifies the result. Run this before switching a deployment
//! from webhook delivery back to polling.

use teloxide::prelude::*;
use tracing::{info, warn};

use SnapText::config::Settings;
use SnapText::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let settings = Settings::new()?;
    settings.validate()?;
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("{} webhook cleaner", SnapText::info());

    let bot = Bot::new(&settings.bot.token);

    let before = bot.get_webhook_info().await?;
    match &before.url {
        Some(url) => {
            info!(
                url = %url,
                pending = before.pending_update_count,
                "Webhook is currently set, clearing"
            );
            bot.delete_webhook().await?;
            info!("Webhook cleared");
        }
        None => {
            info!("No webhook is currently set, no conflicts detected");
        }
    }

    let after = bot.get_webhook_info().await?;
    if after.url.is_none() {
        info!("Webhook successfully removed, polling mode is safe to use");
    } else {
        warn!("Webhook still appears to be active");
    }

    Ok(())
}
