//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Envelope every Bot API response is wrapped in
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram bot message sender
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(
        config: &TelegramConfig,
        bot_token: &str,
        chat_id: &str,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        tracing::debug!("Created TelegramNotifier for chat '{}'", chat_id);

        Self {
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                config.api_url.trim_end_matches('/'),
                bot_token
            ),
            chat_id: chat_id.to_string(),
            http,
        }
    }

    async fn deliver(&self, message: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];
        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| match e {
                crate::HomeworkBotError::Transport(msg) => {
                    // The request URL embeds the bot token.
                    let scrubbed = msg.replace(&self.send_message_url, "sendMessage");
                    crate::HomeworkBotError::Transport(scrubbed)
                }
                other => other,
            })?;

        let parsed: Option<TelegramResponse> = serde_json::from_str(&response.body).ok();
        if !response.is_success() || !parsed.as_ref().is_some_and(|r| r.ok) {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::HomeworkBotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> bool {
        match self.deliver(message).await {
            Ok(()) => {
                tracing::debug!("Message sent to chat '{}'", self.chat_id);
                true
            }
            Err(e) => {
                tracing::error!("Message was not sent to chat '{}': {}", self.chat_id, e);
                false
            }
        }
    }
}
