use stockledger_core::NotificationId;

use super::{Notifier, NotifyError};

/// Notifier that only emits a structured log event.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    recipient: String,
}

impl LogNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

impl Notifier for LogNotifier {
    fn recipient(&self) -> &str {
        &self.recipient
    }

    fn notify(&self, subject: &str, body: &str) -> Result<NotificationId, NotifyError> {
        let id = NotificationId::new();
        tracing::info!(
            notification_id = %id,
            recipient = %self.recipient,
            subject,
            body,
            "notification logged"
        );
        Ok(id)
    }
}
