//! User-visible, transient operation outcomes.
//!
//! Resources report success and failure through a [`Notifier`] passed in at
//! construction. [`TracingNotifier`] writes them to the log;
//! [`NotificationQueue`] buffers them for a front end (or a test) to drain.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::new(Level::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(Level::Error, message));
    }
}

/// Emits every notification as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::error!(text = %notification.message, "notification"),
            Level::Success => {
                tracing::info!(level = %notification.level, text = %notification.message, "notification")
            }
        }
    }
}

/// Buffers notifications until drained. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        tracing::debug!(level = %notification.level, text = %notification.message, "queued notification");
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let queue = NotificationQueue::new();
        let handle = queue.clone();
        handle.success("saved");
        handle.error("failed");

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                Notification::new(Level::Success, "saved"),
                Notification::new(Level::Error, "failed"),
            ]
        );
        assert!(queue.drain().is_empty());
    }
}
