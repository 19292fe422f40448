//! Notifier trait for delivering chat messages

use async_trait::async_trait;

/// Trait for delivering a text message to the configured chat
///
/// Delivery failures are reported through the return value and never abort
/// the caller. Identical messages are delivered every time; deduplication is
/// left to the poll loop.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Send `message`, returning `true` once delivery is confirmed
    async fn send(&self, message: &str) -> bool;
}
