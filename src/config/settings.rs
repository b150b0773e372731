//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.
//!
//! Every field has a usable default except the bot token, which must be
//! supplied through `SNAPTEXT_BOT__TOKEN` or the plain `BOT_TOKEN`
//! variable used by the hosting platform.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::errors::{Result, SnapTextError};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub download: DownloadConfig,
    pub messages: MessagesConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
    /// Public base URL of the deployment. Presence selects webhook mode.
    pub webhook_url: Option<String>,
    /// Largest declared file size accepted for extraction, in bytes.
    pub max_file_size: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            webhook_url: None,
            max_file_size: 20 * 1024 * 1024,
        }
    }
}

/// HTTP listener configuration, shared by the liveness responder and the
/// webhook callback server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Socket address the HTTP server binds to.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip = self
            .host
            .parse()
            .map_err(|_| SnapTextError::Config(format!("Invalid listen host: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// OCR engine configuration. Languages and recognition modes are a fixed
/// operating contract for the process, not request-dependent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Override for the Tesseract binary location; defaults to `tesseract`
    /// on the PATH.
    pub binary_path: Option<PathBuf>,
    pub languages: Vec<String>,
    /// Tesseract `--oem` value.
    pub engine_mode: u8,
    /// Tesseract `--psm` value.
    pub page_seg_mode: u8,
    pub timeout_seconds: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary_path: None,
            languages: vec!["heb".to_string(), "eng".to_string()],
            engine_mode: 3,
            page_seg_mode: 6,
            timeout_seconds: 30,
        }
    }
}

/// Telegram file download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub timeout_seconds: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

/// All user-facing reply texts. The bot speaks Hebrew to its users; the
/// defaults can be overridden per deployment from the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub welcome: String,
    pub help: String,
    pub processing: String,
    pub text_prompt: String,
    pub not_an_image: String,
    pub no_text_found: String,
    pub extraction_label: String,
    pub invalid_image: String,
    pub photo_failed: String,
    pub document_failed: String,
    pub file_too_large: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            welcome: "🤖 ברוכים הבאים לבוט חילוץ טקסט מתמונות!\n\n\
                      📸 שלחו לי תמונה ואני אחלץ את הטקסט שבתוכה\n\
                      🔤 הבוט תומך בעברית ובאנגלית\n\
                      📄 אפשר לשלוח תמונות כקובץ או כתמונה רגילה\n\n\
                      📋 פקודות זמינות:\n\
                      /start - הודעת פתיחה\n\
                      /help - עזרה ומידע נוסף\n\n\
                      פשוט שלחו תמונה והתחילו! 🚀"
                .to_string(),
            help: "📖 איך להשתמש בבוט:\n\n\
                   1️⃣ שלחו תמונה (כתמונה רגילה או כקובץ)\n\
                   2️⃣ חכו שהבוט יעבד את התמונה\n\
                   3️⃣ תקבלו את הטקסט שנמצא בתמונה\n\n\
                   💡 טיפים:\n\
                   • תמונות ברורות יותר נותנות תוצאות טובות יותר\n\
                   • טקסט גדול וברור יחולץ טוב יותר\n\
                   • הבוט תומך בעברית ובאנגלית\n\n\
                   🔧 פורמטים נתמכים:\n\
                   • JPG, PNG, WEBP, BMP, GIF\n\
                   • תמונות שנשלחו כקובץ או כתמונה"
                .to_string(),
            processing: "🔄 מעבד את התמונה...".to_string(),
            text_prompt: "📸 אנא שלחו תמונה כדי לחלץ ממנה טקסט!\n\n\
                          ניתן לשלוח תמונה בתור:\n\
                          • תמונה רגילה\n\
                          • קובץ תמונה\n\n\
                          השתמשו ב-/help למידע נוסף"
                .to_string(),
            not_an_image: "❌ אנא שלחו קובץ תמונה בלבד".to_string(),
            no_text_found: "❌ לא נמצא טקסט בתמונה או שהטקסט לא ברור מספיק".to_string(),
            extraction_label: "📝 הטקסט שנמצא בתמונה:".to_string(),
            invalid_image: "❌ הקובץ שנשלח אינו תמונה תקינה. אנא נסו תמונה אחרת".to_string(),
            photo_failed: "❌ אירעה שגיאה בעיבוד התמונה. אנא נסו שנית.".to_string(),
            document_failed: "❌ אירעה שגיאה בעיבוד הקובץ. אנא נסו שנית.".to_string(),
            file_too_large: "❌ הקובץ גדול מדי לעיבוד. אנא שלחו תמונה קטנה יותר".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, a daily-rolling log file is written to this directory in
    /// addition to stdout.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// How updates reach the dispatcher. Resolved exactly once at startup and
/// fixed for the process lifetime; running both strategies at once causes
/// delivery conflicts against the Bot API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Pull updates with long polling.
    Polling,
    /// Receive updates pushed to a callback registered under `public_url`.
    Webhook { public_url: Url },
}

impl DeliveryMode {
    /// The callback endpoint registered with Telegram in webhook mode.
    pub fn webhook_endpoint(public_url: &Url) -> Result<Url> {
        Ok(public_url.join("/webhook")?)
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self> {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SNAPTEXT").separator("__"))
            .build()?;

        let mut settings: Settings = loaded.try_deserialize()?;
        settings.apply_overrides_from(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply the plain environment variables used by the hosting platform.
    /// These predate the prefixed scheme and take precedence over it.
    fn apply_overrides_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(token) = get("BOT_TOKEN") {
            self.bot.token = token;
        }
        if let Some(url) = get("WEBHOOK_URL") {
            if !url.is_empty() {
                self.bot.webhook_url = Some(url);
            }
        }
        if let Some(port) = get("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = get("TESSERACT_PATH") {
            self.ocr.binary_path = Some(PathBuf::from(path));
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(size) = get("MAX_FILE_SIZE").and_then(|s| s.parse().ok()) {
            self.bot.max_file_size = size;
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Resolve the delivery mode from validated settings.
    ///
    /// Webhook mode wins whenever a public URL is available, either
    /// configured explicitly or derived from the platform-supplied host
    /// (`RENDER_EXTERNAL_HOSTNAME`). The result is deterministic for a
    /// given configuration.
    pub fn delivery_mode(&self, platform_host: Option<&str>) -> Result<DeliveryMode> {
        let raw = match (&self.bot.webhook_url, platform_host) {
            (Some(url), _) => Some(url.clone()),
            (None, Some(host)) if !host.is_empty() => Some(format!("https://{host}")),
            _ => None,
        };

        match raw {
            Some(url) => Ok(DeliveryMode::Webhook {
                public_url: Url::parse(&url)?,
            }),
            None => Ok(DeliveryMode::Polling),
        }
    }
}
