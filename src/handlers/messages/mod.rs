//! Message handlers module
//!
//! Routes incoming messages to exactly one handler and hosts the
//! photo/document/text handlers built around the extraction pipeline:
//! acknowledge, download, decode, recognize, reply.
//!
//! Every failure inside a handler is converted to a user-facing reply at
//! the handler boundary; nothing here ever propagates an error back into
//! the dispatch loop, so one bad update cannot stop the next one.

use std::sync::Arc;
use std::time::Instant;

use teloxide::{
    prelude::*,
    types::{Document, FileId, Message},
    Bot,
};
use tracing::{debug, error, warn};

use crate::config::{MessagesConfig, Settings};
use crate::services::ServiceFactory;
use crate::utils::errors::{Result, SnapTextError};
use crate::utils::logging;

/// Which handler an incoming message belongs to.
///
/// The priority is fixed: commands win over photos, photos over documents,
/// documents over plain text. A message carrying none of these payloads is
/// dropped. Changing this order silently mis-routes messages that carry
/// both a command and an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRoute {
    Command,
    Photo,
    Document,
    NonImageDocument,
    Text,
    Ignore,
}

/// Classify a message. The single source of truth for handler selection.
pub fn route_message(msg: &Message) -> MessageRoute {
    let command_text = msg.text().or_else(|| msg.caption());
    if command_text.is_some_and(|t| t.starts_with('/')) {
        return MessageRoute::Command;
    }
    if msg.photo().is_some() {
        return MessageRoute::Photo;
    }
    if let Some(doc) = msg.document() {
        return if is_image_document(doc) {
            MessageRoute::Document
        } else {
            MessageRoute::NonImageDocument
        };
    }
    if msg.text().is_some() {
        return MessageRoute::Text;
    }
    MessageRoute::Ignore
}

/// A document qualifies for extraction only when its declared content type
/// is an image. The declared type is trusted here; undecodable payloads
/// are still caught later by the imaging service.
fn is_image_document(doc: &Document) -> bool {
    doc.mime_type
        .as_ref()
        .is_some_and(|m| m.type_() == mime::IMAGE)
}

/// Handle any non-command message. Invoked by the dispatcher after the
/// command branch has had its chance.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    match route_message(&msg) {
        MessageRoute::Command => {
            // Commands the command branch did not recognize land here;
            // /-prefixed typos are dropped rather than fed to extraction.
            debug!(chat_id = ?msg.chat.id, "Ignoring unrecognized command");
            Ok(())
        }
        MessageRoute::Photo => handle_photo(bot, msg, services, settings).await,
        MessageRoute::Document => handle_document(bot, msg, services, settings).await,
        MessageRoute::NonImageDocument => reject_non_image(&bot, &msg, &settings).await,
        MessageRoute::Text => handle_text(bot, msg, settings).await,
        MessageRoute::Ignore => {
            logging::log_dropped_update(msg.chat.id.0, "no extractable payload");
            Ok(())
        }
    }
}

/// Handle a photo message: extract text from the highest-resolution size.
pub async fn handle_photo(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    let Some(photo) = msg
        .photo()
        .and_then(|sizes| sizes.iter().max_by_key(|p| u64::from(p.width) * u64::from(p.height)))
    else {
        return Ok(());
    };

    run_extraction(
        &bot,
        &msg,
        &services,
        &settings,
        photo.file.id.clone(),
        photo.file.size,
        ExtractionKind::Photo,
    )
    .await
}

/// Handle a document message carrying an image content type.
pub async fn handle_document(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    let Some(doc) = msg.document() else {
        return Ok(());
    };

    // route_message already rejected non-image documents; re-check so the
    // gate also holds when this handler is called directly.
    if !is_image_document(doc) {
        return reject_non_image(&bot, &msg, &settings).await;
    }

    run_extraction(
        &bot,
        &msg,
        &services,
        &settings,
        doc.file.id.clone(),
        doc.file.size,
        ExtractionKind::Document,
    )
    .await
}

/// Handle plain text: point the user at sending an image instead.
pub async fn handle_text(bot: Bot, msg: Message, settings: Arc<Settings>) -> Result<()> {
    bot.send_message(msg.chat.id, settings.messages.text_prompt.clone())
        .await?;
    Ok(())
}

/// Which attachment flavor the extraction came from; picks the matching
/// failure text.
#[derive(Debug, Clone, Copy)]
enum ExtractionKind {
    Photo,
    Document,
}

impl ExtractionKind {
    fn failure_text<'a>(&self, messages: &'a MessagesConfig) -> &'a str {
        match self {
            ExtractionKind::Photo => &messages.photo_failed,
            ExtractionKind::Document => &messages.document_failed,
        }
    }
}

async fn reject_non_image(bot: &Bot, msg: &Message, settings: &Settings) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "Rejecting document with non-image content type");
    if let Err(e) = bot
        .send_message(msg.chat.id, settings.messages.not_an_image.clone())
        .await
    {
        error!(error = %e, chat_id = ?msg.chat.id, "Failed to deliver rejection reply");
    }
    Ok(())
}

/// The shared photo/document pipeline. Always returns Ok: every outcome,
/// success or failure, ends as a reply (or a logged reply failure).
async fn run_extraction(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    settings: &Settings,
    file_id: FileId,
    declared_size: u32,
    kind: ExtractionKind,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let user_id = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or_default();
    let started = Instant::now();

    // Latency-hiding courtesy message; best-effort only.
    let processing = match bot
        .send_message(chat_id, settings.messages.processing.clone())
        .await
    {
        Ok(sent) => Some(sent),
        Err(e) => {
            warn!(error = %e, chat_id = ?chat_id, "Failed to send processing acknowledgement");
            None
        }
    };

    let outcome = extract_text(services, settings, file_id, declared_size).await;

    // Cosmetic cleanup; must not abort the reply.
    if let Some(sent) = processing {
        if let Err(e) = bot.delete_message(chat_id, sent.id).await {
            debug!(error = %e, "Failed to delete processing acknowledgement");
        }
    }

    let reply = match &outcome {
        Ok(text) => {
            logging::log_extraction(user_id, text.trim().chars().count(), started.elapsed().as_millis());
            compose_extraction_reply(&settings.messages, text)
        }
        Err(e) => {
            logging::log_extraction_failed(user_id, &e.to_string());
            if !e.is_recoverable() {
                error!(error = %e, user_id, "Extraction hit a non-recoverable error");
            }
            reply_for_error(&settings.messages, e, kind).to_string()
        }
    };

    // Last line of defense: a failed reply is logged and swallowed.
    if let Err(e) = bot.send_message(chat_id, reply).await {
        error!(error = %e, chat_id = ?chat_id, "Failed to deliver extraction reply");
    }

    Ok(())
}

/// Gate on the declared size, then download, decode and recognize.
async fn extract_text(
    services: &ServiceFactory,
    settings: &Settings,
    file_id: FileId,
    declared_size: u32,
) -> Result<String> {
    let limit = settings.bot.max_file_size;
    if declared_size > limit {
        return Err(SnapTextError::FileTooLarge {
            size: declared_size,
            limit,
        });
    }

    let bytes = services.file_service.download(file_id).await?;
    let png = services.imaging_service.prepare(&bytes)?;
    services.ocr_service.recognize(&png).await
}

/// Turn an extraction result into the reply text. Whitespace-only output
/// means "no text found", never the label with nothing under it.
pub fn compose_extraction_reply(messages: &MessagesConfig, text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        messages.no_text_found.clone()
    } else {
        format!("{}\n\n{}", messages.extraction_label, trimmed)
    }
}

/// Map a pipeline error onto the configured user-facing reply.
fn reply_for_error<'a>(
    messages: &'a MessagesConfig,
    error: &SnapTextError,
    kind: ExtractionKind,
) -> &'a str {
    match error {
        SnapTextError::Decode(_) => &messages.invalid_image,
        SnapTextError::FileTooLarge { .. } => &messages.file_too_large,
        _ => kind.failure_text(messages),
    }
}
