//! BDD step definitions for the Telegram notification feature

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_notifier::config::TelegramConfig;
use homework_notifier::io::{HttpClient, HttpResponse};
use homework_notifier::telegram::TelegramNotifier;
use homework_notifier::HomeworkBotError;

use crate::world::NotifierWorld;

/// Mock HTTP client that answers every POST with a fixed status and body
struct CannedPostClient {
    status: u16,
    body: &'static str,
}

#[async_trait::async_trait]
impl HttpClient for CannedPostClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_notifier::Result<HttpResponse> {
        Err(HomeworkBotError::Transport("GET not expected".to_string()))
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_notifier::Result<HttpResponse> {
        Ok(HttpResponse {
            status: self.status,
            reason: String::new(),
            body: self.body.to_string(),
        })
    }
}

/// Mock HTTP client that simulates network failure
struct UnreachablePostClient;

#[async_trait::async_trait]
impl HttpClient for UnreachablePostClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_notifier::Result<HttpResponse> {
        Err(HomeworkBotError::Transport("connection refused".to_string()))
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_notifier::Result<HttpResponse> {
        Err(HomeworkBotError::Transport("connection refused".to_string()))
    }
}

fn telegram(http: Arc<dyn HttpClient>) -> Box<TelegramNotifier> {
    Box::new(TelegramNotifier::new(
        &TelegramConfig::default(),
        "123:abc",
        "42",
        http,
    ))
}

#[given("a Telegram notifier with valid credentials")]
fn telegram_valid(world: &mut NotifierWorld) {
    world.notifier = Some(telegram(Arc::new(CannedPostClient {
        status: 200,
        body: r#"{"ok":true,"result":{"message_id":1}}"#,
    })));
}

#[given("a Telegram notifier whose chat does not exist")]
fn telegram_api_error(world: &mut NotifierWorld) {
    world.notifier = Some(telegram(Arc::new(CannedPostClient {
        status: 400,
        body: r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
    })));
}

#[given("a Telegram notifier that is unreachable")]
fn telegram_unreachable(world: &mut NotifierWorld) {
    world.notifier = Some(telegram(Arc::new(UnreachablePostClient)));
}

#[when(expr = "the message {string} is sent")]
async fn send_message(world: &mut NotifierWorld, message: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.send_result = Some(notifier.send(&message).await);
}

#[then("the delivery should be confirmed")]
fn delivery_confirmed(world: &mut NotifierWorld) {
    assert_eq!(world.send_result, Some(true));
}

#[then("the delivery should be reported as failed")]
fn delivery_failed(world: &mut NotifierWorld) {
    assert_eq!(world.send_result, Some(false));
}
