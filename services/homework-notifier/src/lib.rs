//! Homework Notifier - homework review status poller
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and forwards them to a Telegram chat.

pub mod api_client;
pub mod clock;
pub mod config;
pub mod error;
pub mod extractor;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod poll_loop;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config, Credentials};
pub use error::{HomeworkBotError, Result};
pub use poll_loop::{CycleOutcome, PollLoop};
pub use status::HomeworkStatus;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api_client::PracticumClient;
use crate::clock::SystemClock;
use crate::io::ReqwestHttpClient;
use crate::telegram::TelegramNotifier;

/// Build the poll loop from configuration and credentials
pub fn build_poll_loop(config: &Config, credentials: &Credentials) -> Result<PollLoop> {
    let api_http = Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
        config.api.timeout_seconds,
    ))?);
    let telegram_http = Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
        config.telegram.timeout_seconds,
    ))?);

    let api = PracticumClient::new(&config.api, &credentials.practicum_token, api_http);
    let notifier = TelegramNotifier::new(
        &config.telegram,
        &credentials.telegram_token,
        &credentials.telegram_chat_id,
        telegram_http,
    );

    Ok(PollLoop::new(
        Arc::new(api),
        Arc::new(notifier),
        Arc::new(SystemClock),
        Duration::from_secs(config.polling.retry_period_seconds),
    ))
}

/// Run the notifier until Ctrl-C
pub async fn run(config: Config, credentials: Credentials) -> Result<()> {
    let poll_loop = build_poll_loop(&config, &credentials)?;
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Homework notifier started");
    poll_loop.run(cancel).await;
    tracing::info!("Homework notifier stopped");

    Ok(())
}
