//! Outbound alert notification boundary.
//!
//! A notifier takes a `(subject, body)` pair and delivers it to the fixed
//! recipient it was built with. Delivery mechanics (SMTP relays, chat bots)
//! live behind this trait; callers only learn success or failure.

pub mod in_memory;
pub mod log;
pub mod outbox;

use std::sync::Arc;

use thiserror::Error;

use stockledger_core::NotificationId;

pub use in_memory::{InMemoryNotifier, SentNotification};
pub use log::LogNotifier;
pub use outbox::{OutboxMessage, OutboxNotifier};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode notification: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

pub trait Notifier: Send + Sync {
    fn recipient(&self) -> &str;

    fn notify(&self, subject: &str, body: &str) -> Result<NotificationId, NotifyError>;
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn recipient(&self) -> &str {
        (**self).recipient()
    }

    fn notify(&self, subject: &str, body: &str) -> Result<NotificationId, NotifyError> {
        (**self).notify(subject, body)
    }
}

impl<N> Notifier for Box<N>
where
    N: Notifier + ?Sized,
{
    fn recipient(&self) -> &str {
        (**self).recipient()
    }

    fn notify(&self, subject: &str, body: &str) -> Result<NotificationId, NotifyError> {
        (**self).notify(subject, body)
    }
}
