//! BDD step definitions for the poll loop feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde_json::json;

use homework_notifier::poll_loop::FAILURE_PREFIX;
use homework_notifier::{CycleOutcome, PollLoop};

use crate::world::{ApiReply, FakeClock, NotifierWorld};

fn outcome_matches(name: &str, outcome: &CycleOutcome) -> bool {
    match name {
        "no update" => *outcome == CycleOutcome::NoUpdate,
        "delivered" => *outcome == CycleOutcome::Delivered,
        "duplicate" => *outcome == CycleOutcome::Duplicate,
        "delivery failed" => *outcome == CycleOutcome::DeliveryFailed,
        "failed" => matches!(outcome, CycleOutcome::Failed { .. }),
        other => panic!("Unknown outcome: {}", other),
    }
}

fn parse_cursors(s: &str) -> Vec<i64> {
    s.split(',')
        .map(|part| part.trim().parse().expect("cursor must be an integer"))
        .collect()
}

#[given(expr = "the current time is {int}")]
fn current_time(world: &mut NotifierWorld, time: i64) {
    world.start_time = time;
}

#[given("a chat that accepts messages")]
fn chat_accepts(world: &mut NotifierWorld) {
    world.chat.set_rejecting(false);
}

#[given("the chat rejects messages")]
fn chat_rejects(world: &mut NotifierWorld) {
    world.chat.set_rejecting(true);
}

#[given(expr = "the API returns homework {string} with status {string} at {int}")]
fn api_returns_homework(world: &mut NotifierWorld, name: String, status: String, date: i64) {
    world.api.push(ApiReply::Payload(json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": date
    })));
}

#[given(expr = "the API returns no homeworks at {int}")]
fn api_returns_nothing(world: &mut NotifierWorld, date: i64) {
    world.api.push(ApiReply::Payload(json!({
        "homeworks": [],
        "current_date": date
    })));
}

#[given("the API returns the payload:")]
fn api_returns_payload(world: &mut NotifierWorld, step: &Step) {
    let body = step.docstring.as_ref().expect("payload docstring missing");
    let payload = serde_json::from_str(body).expect("payload must be JSON");
    world.api.push(ApiReply::Payload(payload));
}

#[given(expr = "the API responds with HTTP status {int} {string}")]
fn api_http_status(world: &mut NotifierWorld, status: u16, reason: String) {
    world.api.push(ApiReply::Status(status, reason));
}

#[given("the API is unreachable")]
fn api_unreachable(world: &mut NotifierWorld) {
    world.api.push(ApiReply::Unreachable);
}

#[when("a poll cycle runs")]
async fn one_cycle(world: &mut NotifierWorld) {
    let outcome = world.poll_loop().run_cycle().await;
    world.outcomes.push(outcome);
}

#[when(expr = "{int} poll cycles run")]
async fn many_cycles(world: &mut NotifierWorld, cycles: usize) {
    for _ in 0..cycles {
        let outcome = world.poll_loop().run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[when(expr = "the poll loop runs until it has slept {int} times")]
async fn run_until_slept(world: &mut NotifierWorld, sleeps: usize) {
    let clock = Arc::new(FakeClock::new(world.start_time, sleeps));
    let api = Arc::clone(&world.api);
    let chat = Arc::clone(&world.chat);
    let poll_loop = PollLoop::new(
        api,
        chat,
        clock.clone(),
        Duration::from_secs(600),
    );
    let cancel = clock.cancel.clone();

    tokio::time::timeout(Duration::from_secs(5), poll_loop.run(cancel))
        .await
        .expect("poll loop did not stop");
    world.clock = Some(clock);
}

#[then(expr = "the chat received {int} message(s)")]
fn chat_received(world: &mut NotifierWorld, count: usize) {
    assert_eq!(world.chat.delivered().len(), count, "{:?}", world.chat.delivered());
}

#[then(expr = "{int} delivery attempt(s) were made")]
fn delivery_attempts(world: &mut NotifierWorld, count: usize) {
    assert_eq!(world.chat.attempts().len(), count, "{:?}", world.chat.attempts());
}

#[then("the last chat message is:")]
fn last_message_is(world: &mut NotifierWorld, step: &Step) {
    let expected = step.docstring.as_ref().expect("message docstring missing");
    let delivered = world.chat.delivered();
    let last = delivered.last().expect("no message delivered");
    assert_eq!(last, expected.trim());
}

#[then(expr = "the last chat message reports a failure mentioning {string}")]
fn last_message_reports_failure(world: &mut NotifierWorld, fragment: String) {
    let delivered = world.chat.delivered();
    let last = delivered.last().expect("no message delivered");
    assert!(last.starts_with(FAILURE_PREFIX), "{last}");
    assert!(last.contains(&fragment), "{last}");
}

#[then(expr = "the cursor is {int}")]
fn cursor_is(world: &mut NotifierWorld, cursor: i64) {
    assert_eq!(world.poll_loop().cursor(), cursor);
}

#[then(expr = "the last cycle outcome is {string}")]
fn last_outcome_is(world: &mut NotifierWorld, outcome: String) {
    let last = world.outcomes.last().expect("no cycle has run");
    assert!(outcome_matches(&outcome, last), "expected {outcome}, got {last:?}");
}

#[then(expr = "the API was fetched with cursors {string}")]
fn fetched_with_cursors(world: &mut NotifierWorld, cursors: String) {
    assert_eq!(world.api.cursors(), parse_cursors(&cursors));
}

#[then(expr = "the loop slept {int} times for {int} seconds each")]
fn slept(world: &mut NotifierWorld, times: usize, seconds: u64) {
    let clock = world.clock.as_ref().expect("poll loop was not run");
    let sleeps = clock.sleeps.lock().unwrap();
    assert_eq!(*sleeps, vec![Duration::from_secs(seconds); times]);
}
