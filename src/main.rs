//! SnapText Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use teloxide::{prelude::*, types::Update};
use tracing::{debug, error, info};

use SnapText::{
    config::{DeliveryMode, Settings},
    handlers::{
        commands::{help, start},
        messages::handle_message,
    },
    server,
    services::ServiceFactory,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv::dotenv();

    // Load configuration; a missing token exits nonzero before any handler
    // is registered
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the dispatcher
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", SnapText::info());

    // Resolve the delivery mode once; it is fixed for the process lifetime.
    // Running webhook and polling at the same time triggers delivery
    // conflicts against the Bot API.
    let mode = settings.delivery_mode(
        std::env::var("RENDER_EXTERNAL_HOSTNAME").ok().as_deref(),
    )?;

    let bot = Bot::new(&settings.bot.token);
    let services = Arc::new(ServiceFactory::new(bot.clone(), &settings)?);
    let settings = Arc::new(settings);

    let handler = create_handler();
    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![Arc::clone(&services), Arc::clone(&settings)])
        .default_handler(|upd| async move {
            debug!(update = ?upd, "Unhandled update, dropping");
        })
        .enable_ctrlc_handler()
        .build();

    let listen_addr = settings.server.listen_addr()?;

    match mode {
        DeliveryMode::Polling => {
            tokio::spawn(async move {
                if let Err(e) = server::serve_health(listen_addr).await {
                    error!(error = %e, "Liveness responder stopped");
                }
            });

            info!("Starting bot with polling mode...");
            dispatcher.dispatch().await;
        }
        DeliveryMode::Webhook { public_url } => {
            let endpoint = DeliveryMode::webhook_endpoint(&public_url)?;
            info!("Starting bot in webhook mode at {endpoint}");

            // Registration must complete before any update is processed; a
            // failure here is fatal, never a silent fall back to polling.
            let (listener, stop_flag, webhook_router) = webhooks::axum_to_router(
                bot.clone(),
                webhooks::Options::new(listen_addr, endpoint),
            )
            .await?;

            let app = webhook_router.merge(server::health_router());
            let tcp = tokio::net::TcpListener::bind(listen_addr).await?;
            info!("Webhook server listening on {listen_addr}");
            tokio::spawn(async move {
                if let Err(e) = axum::serve(tcp, app)
                    .with_graceful_shutdown(stop_flag)
                    .await
                {
                    error!(error = %e, "Webhook server stopped");
                }
            });

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    info!("SnapText bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry().branch(
        Update::filter_message()
            .branch(
                // Handle commands
                dptree::entry()
                    .filter_command::<BotCommands>()
                    .endpoint(handle_commands),
            )
            .branch(
                // Handle photo/document/text messages
                dptree::endpoint(handle_messages),
            ),
    )
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "SnapText Bot Commands")]
enum BotCommands {
    #[command(description = "Start the bot and show the welcome message")]
    Start,
    #[command(description = "Show usage instructions")]
    Help,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    settings: Arc<Settings>,
) -> HandlerResult {
    let result = match cmd {
        BotCommands::Start => start::handle_start(bot, msg, settings).await,
        BotCommands::Help => help::handle_help(bot, msg, settings).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle photo, document and text messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, services, settings).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
