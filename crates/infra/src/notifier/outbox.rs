use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::NotificationId;

use super::{Notifier, NotifyError};

/// One queued message, as stored in the outbox file (JSON lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub id: NotificationId,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub queued_at: DateTime<Utc>,
}

/// Appends each notification to a JSON-lines outbox for an external relay to deliver.
#[derive(Debug)]
pub struct OutboxNotifier {
    path: PathBuf,
    recipient: String,
    lock: Mutex<()>,
}

impl OutboxNotifier {
    pub fn new(path: impl Into<PathBuf>, recipient: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            recipient: recipient.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All messages queued so far, oldest first.
    pub fn queued(&self) -> Result<Vec<OutboxMessage>, NotifyError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        text.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(NotifyError::from))
            .collect()
    }
}

impl Notifier for OutboxNotifier {
    fn recipient(&self) -> &str {
        &self.recipient
    }

    fn notify(&self, subject: &str, body: &str) -> Result<NotificationId, NotifyError> {
        if self.recipient.trim().is_empty() {
            return Err(NotifyError::Rejected("no alert recipient configured".to_string()));
        }

        let message = OutboxMessage {
            id: NotificationId::new(),
            recipient: self.recipient.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
            queued_at: Utc::now(),
        };
        let mut line = serde_json::to_string(&message)?;
        line.push('\n');

        let _guard = self
            .lock
            .lock()
            .map_err(|_| NotifyError::Rejected("outbox lock poisoned".to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;

        tracing::info!(notification_id = %message.id, recipient = %self.recipient, "notification queued");
        Ok(message.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_appended_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxNotifier::new(dir.path().join("out/outbox.jsonl"), "stores@example.com");

        let first = outbox.notify("Low Stock Alert", "Fairy: 1\n").unwrap();
        let second = outbox.notify("Low Stock Alert", "Fairy: 0\n").unwrap();

        let queued = outbox.queued().unwrap();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].id, first);
        assert_eq!(queued[1].id, second);
        assert_eq!(queued[0].recipient, "stores@example.com");
        assert_eq!(queued[1].body, "Fairy: 0\n");
    }

    #[test]
    fn blank_recipient_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxNotifier::new(dir.path().join("outbox.jsonl"), " ");
        assert!(matches!(outbox.notify("s", "b"), Err(NotifyError::Rejected(_))));
        assert!(outbox.queued().unwrap().is_empty());
    }
}
