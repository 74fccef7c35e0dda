use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use stockledger_core::NotificationId;

use super::{Notifier, NotifyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub id: NotificationId,
    pub subject: String,
    pub body: String,
}

/// In-memory notifier for tests/dev. Can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    recipient: String,
    sent: Mutex<Vec<SentNotification>>,
    failing: AtomicBool,
}

impl InMemoryNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Notifier for InMemoryNotifier {
    fn recipient(&self) -> &str {
        &self.recipient
    }

    fn notify(&self, subject: &str, body: &str) -> Result<NotificationId, NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Rejected("transport unavailable".to_string()));
        }
        let id = NotificationId::new();
        self.sent
            .lock()
            .map_err(|_| NotifyError::Rejected("lock poisoned".to_string()))?
            .push(SentNotification {
                id,
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(id)
    }
}
