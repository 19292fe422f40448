//! Poll loop: fetches statuses, deduplicates messages, and reports failures

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api_client::HomeworkApi;
use crate::clock::Clock;
use crate::extractor::extract;
use crate::notifier::Notifier;
use crate::validator::{current_date, validate};

/// Prefix of the message sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// What a single cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no new statuses
    NoUpdate,
    /// A new status message was delivered and the cursor advanced
    Delivered,
    /// The message matched the last delivered one and was not sent again
    Duplicate,
    /// The message could not be delivered; it will be retried next cycle
    DeliveryFailed,
    /// Fetching or parsing failed; `reported` is true if the failure
    /// message was delivered during this cycle
    Failed { message: String, reported: bool },
}

/// Drives fetch, validate, extract and notify on a fixed period
///
/// Owns the polling cursor and the last delivered message; neither is shared.
pub struct PollLoop {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    retry_period: Duration,
    cursor: i64,
    last_message: Option<String>,
}

impl std::fmt::Debug for PollLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollLoop")
            .field("retry_period", &self.retry_period)
            .field("cursor", &self.cursor)
            .field("last_message", &self.last_message)
            .finish()
    }
}

impl PollLoop {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        retry_period: Duration,
    ) -> Self {
        let cursor = clock.now();
        Self {
            api,
            notifier,
            clock,
            retry_period,
            cursor,
            last_message: None,
        }
    }

    /// Lower bound used for the next fetch
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Most recently delivered message, status update or failure alike
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Run cycles until `cancel` fires. Cancellation only interrupts the sleep.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(
            "Polling every {}s starting from {}",
            self.retry_period.as_secs(),
            self.cursor
        );

        while !cancel.is_cancelled() {
            let outcome = self.run_cycle().await;
            tracing::debug!("Cycle finished: {:?}, cursor={}", outcome, self.cursor);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.clock.sleep(self.retry_period) => {}
            }
        }

        tracing::debug!("Poll loop cancelled");
    }

    /// Run one fetch-validate-extract-notify cycle without sleeping
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.check().await {
            Ok(None) => CycleOutcome::NoUpdate,
            Ok(Some((message, server_date))) => {
                if self.last_message.as_deref() == Some(message.as_str()) {
                    tracing::debug!("Status unchanged, not resending: {}", message);
                    return CycleOutcome::Duplicate;
                }
                if !self.notifier.send(&message).await {
                    return CycleOutcome::DeliveryFailed;
                }

                tracing::info!("Status update sent: {}", message);
                self.advance_cursor(server_date);
                self.last_message = Some(message);
                CycleOutcome::Delivered
            }
            Err(e) => {
                let message = format!("{}: {}", FAILURE_PREFIX, e);
                tracing::error!("{}", message);
                let reported = self.report_failure(&message).await;
                CycleOutcome::Failed { message, reported }
            }
        }
    }

    async fn check(&self) -> crate::Result<Option<(String, Option<i64>)>> {
        let payload = self.api.fetch(self.cursor).await?;
        let records = validate(&payload)?;
        Ok(extract(&records)?.map(|message| (message, current_date(&payload))))
    }

    async fn report_failure(&mut self, message: &str) -> bool {
        if self.last_message.as_deref() == Some(message) {
            tracing::debug!("Failure already reported, not resending");
            return false;
        }
        if !self.notifier.send(message).await {
            return false;
        }
        self.last_message = Some(message.to_string());
        true
    }

    fn advance_cursor(&mut self, server_date: Option<i64>) {
        match server_date {
            Some(date) => self.cursor = self.cursor.max(date),
            None => tracing::warn!(
                "Response has no usable current_date, keeping cursor at {}",
                self.cursor
            ),
        }
    }
}
