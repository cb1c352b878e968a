//! Service entry point: wires stores, gateway, dialog engine, schedulers,
//! and the webhook server.

use std::process;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bookline::adapters::http::{router, WebhookState};
use bookline::adapters::storage::{
    InMemoryBookingStore, InMemoryConversationStore, InMemorySlotStore,
};
use bookline::adapters::whatsapp::CloudApiGateway;
use bookline::application::{
    BookingManager, ConversationEngine, ReminderScheduler, SlotInitializer,
};
use bookline::config::AppConfig;
use bookline::ports::InboundMessageHandler;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration error");
            process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        error!(error = %err, "fatal");
        process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let slots = Arc::new(InMemorySlotStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let conversations = Arc::new(InMemoryConversationStore::new());

    let gateway = Arc::new(CloudApiGateway::new(
        reqwest::Client::new(),
        config.whatsapp.api_base.clone(),
        config.whatsapp.phone_number_id.clone(),
        config.whatsapp.access_token.clone(),
    ));

    let manager = Arc::new(BookingManager::new(Arc::clone(&slots), Arc::clone(&bookings)));
    let engine: Arc<dyn InboundMessageHandler> = Arc::new(ConversationEngine::new(
        Arc::clone(&manager),
        conversations,
        Arc::clone(&gateway),
        config.admin.secret.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let initializer = SlotInitializer::new(Arc::clone(&slots), config.scheduling.slot_initializer());
    let initializer_shutdown = shutdown_rx.clone();
    let initializer_task = tokio::spawn(async move {
        initializer.run(initializer_shutdown).await;
    });

    let reminder = ReminderScheduler::new(
        Arc::clone(&bookings),
        Arc::clone(&gateway),
        config.scheduling.reminder_scheduler(),
    );
    let reminder_shutdown = shutdown_rx.clone();
    let reminder_task = tokio::spawn(async move {
        reminder.run(reminder_shutdown).await;
    });

    let state = Arc::new(WebhookState {
        verify_token: config.whatsapp.verify_token.clone(),
        app_secret: config.whatsapp.app_secret.clone(),
        handler: engine,
    });
    let app = router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(error = %err, "failed to install shutdown handler");
            }
            info!("shutdown signal received");
        })
        .await?;

    // Stop the background loops after the server drains.
    let _ = shutdown_tx.send(true);
    let _ = initializer_task.await;
    let _ = reminder_task.await;
    info!("bye");
    Ok(())
}
