//! Integration tests for the stateless command handlers

mod helpers;

use std::sync::Arc;

use SnapText::config::Settings;
use SnapText::handlers::commands::{handle_help, handle_start};
use SnapText::handlers::messages::handle_message;
use SnapText::services::ServiceFactory;

use helpers::telegram_mock::TelegramMockServer;
use helpers::test_data;

#[tokio::test]
async fn start_replies_with_the_configured_welcome_message() {
    let mock = TelegramMockServer::new().await;
    mock.mock_send_message().await;

    let settings = Arc::new(Settings::default());
    let msg = test_data::text_message("/start");

    handle_start(mock.bot(), msg, Arc::clone(&settings))
        .await
        .unwrap();

    let texts = mock.sent_texts().await;
    assert_eq!(texts, vec![settings.messages.welcome.clone()]);
}

#[tokio::test]
async fn help_replies_with_the_configured_help_message() {
    let mock = TelegramMockServer::new().await;
    mock.mock_send_message().await;

    let settings = Arc::new(Settings::default());
    let msg = test_data::text_message("/help");

    handle_help(mock.bot(), msg, Arc::clone(&settings))
        .await
        .unwrap();

    let texts = mock.sent_texts().await;
    assert_eq!(texts, vec![settings.messages.help.clone()]);
}

#[tokio::test]
async fn commands_never_reach_the_extraction_pipeline() {
    let mock = TelegramMockServer::new().await;
    mock.mock_send_message().await;

    let settings = Arc::new(Settings::default());
    let bot = mock.bot();
    let services = Arc::new(ServiceFactory::new(bot.clone(), &settings).unwrap());

    // An unrecognized command falls through to the message handler, which
    // must drop it without touching the OCR pipeline or replying.
    let msg = test_data::text_message("/unknown");
    handle_message(bot, msg, services, Arc::clone(&settings))
        .await
        .unwrap();

    assert!(mock.sent_texts().await.is_empty());
    assert!(!mock.was_called("getfile").await);
}

#[tokio::test]
async fn plain_text_gets_the_image_prompt() {
    let mock = TelegramMockServer::new().await;
    mock.mock_send_message().await;

    let settings = Arc::new(Settings::default());
    let bot = mock.bot();
    let services = Arc::new(ServiceFactory::new(bot.clone(), &settings).unwrap());

    let msg = test_data::text_message("hello there");
    handle_message(bot, msg, services, Arc::clone(&settings))
        .await
        .unwrap();

    let texts = mock.sent_texts().await;
    assert_eq!(texts, vec![settings.messages.text_prompt.clone()]);
}
