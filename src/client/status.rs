use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiStatus {
    pub message: String,
    pub severity: Severity,
}

/// The single status line under the contact form.
///
/// Each status disappears after the display duration. A status shown later
/// is never cleared by the timer of an earlier one.
#[derive(Clone)]
pub struct StatusBoard {
    inner: Arc<Inner>,
}

struct Inner {
    tx: watch::Sender<Option<UiStatus>>,
    // Bumped on every `show`; held while publishing so clears cannot race it.
    generation: Mutex<u64>,
    display_for: Duration,
}

impl StatusBoard {
    pub fn new(display_for: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                generation: Mutex::new(0),
                display_for,
            }),
        }
    }

    /// Publishes a status and schedules its removal. Needs a Tokio runtime.
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let status = UiStatus {
            message: message.into(),
            severity,
        };
        tracing::debug!(severity = %status.severity, message = %status.message, "Showing status");

        let shown = {
            let mut generation = self
                .inner
                .generation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *generation += 1;
            self.inner.tx.send_replace(Some(status));
            *generation
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.display_for).await;
            let generation = inner
                .generation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *generation == shown {
                inner.tx.send_replace(None);
            }
        });
    }

    pub fn current(&self) -> Option<UiStatus> {
        self.inner.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UiStatus>> {
        self.inner.tx.subscribe()
    }
}
