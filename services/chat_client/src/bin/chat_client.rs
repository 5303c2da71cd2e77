//! services/chat_client/src/bin/chat_client.rs

use chat_client_lib::{
    adapters::{HealthProbe, HttpChatBackend},
    config::Config,
    console,
    error::ClientError,
    telemetry, ChatController,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    telemetry::init(&config);
    info!("Configuration loaded. Backend at {}", config.backend_url);

    // --- 2. Optional Readiness Check ---
    if config.check_on_start {
        let probe = HealthProbe::new(Duration::from_secs(3))?;
        if !probe.check_backend(&config.backend_url).await.is_healthy() {
            warn!("Backend is not answering yet; messages will fail until it is up.");
        }
    }

    // --- 3. Build the Backend Adapter and Controller ---
    let backend = Arc::new(HttpChatBackend::new(
        config.backend_url.clone(),
        config.request_timeout,
    )?);
    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();
    let controller = Arc::new(ChatController::new(
        backend,
        events_tx,
        config.status_clear_after,
    ));

    // --- 4. Start the Renderer ---
    let shutdown = CancellationToken::new();
    let renderer = tokio::spawn(console::render_events(
        events_rx,
        tokio::io::stdout(),
        shutdown.clone(),
    ));
    println!("{}", console::HELP_TEXT);

    // --- 5. Run the Input Loop ---
    console::run(controller, BufReader::new(tokio::io::stdin())).await?;

    // --- 6. Flush What Is Left and Stop ---
    shutdown.cancel();
    match renderer.await {
        Ok(Err(e)) => error!("Renderer stopped with an error: {}", e),
        Err(e) => error!("Renderer task failed: {}", e),
        Ok(Ok(())) => {}
    }

    info!("Chat client stopped.");
    Ok(())
}
