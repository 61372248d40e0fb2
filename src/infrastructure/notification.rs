use crate::domain::ports::Notifier;
use async_trait::async_trait;

/// Email notification sink.
///
/// Fire-and-forget: the orchestrator never observes whether delivery
/// happened, so this stub only records the message in the log.
#[derive(Debug, Default, Clone)]
pub struct EmailNotifier;

impl EmailNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, message: &str) {
        tracing::info!(message, "email notification sent");
    }
}
