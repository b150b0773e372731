//! Telegram file resolution and download
//!
//! Resolves a file id to raw bytes in two steps: `getFile` for the remote
//! path, then an HTTP fetch from the bot file endpoint. Both steps run
//! under a bounded timeout so a hung transfer cannot stall the update
//! loop for every later sender.

use std::time::Duration;

use reqwest::Client;
use teloxide::prelude::*;
use teloxide::types::FileId;
use tracing::debug;
use url::Url;

use crate::config::Settings;
use crate::utils::errors::{Result, SnapTextError};

/// Downloads Telegram files referenced by incoming messages.
#[derive(Clone)]
pub struct FileService {
    bot: Bot,
    http: Client,
    timeout: Duration,
}

impl FileService {
    pub fn new(bot: Bot, settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.download.timeout_seconds);
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { bot, http, timeout })
    }

    /// Resolve a file id to its raw bytes.
    pub async fn download(&self, file_id: FileId) -> Result<Vec<u8>> {
        let file = tokio::time::timeout(self.timeout, self.bot.get_file(file_id))
            .await
            .map_err(|_| SnapTextError::DownloadTimeout(self.timeout))??;

        debug!(path = %file.path, size = file.size, "Downloading file from Telegram");

        let url = file_url(&self.bot.api_url(), self.bot.token(), &file.path)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Build the bot file endpoint URL for a resolved file path.
fn file_url(api_url: &Url, token: &str, path: &str) -> Result<Url> {
    Ok(api_url.join(&format!("file/bot{token}/{path}"))?)
}
