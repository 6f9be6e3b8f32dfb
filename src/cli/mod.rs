pub mod chat;
pub mod reminders;
pub mod session;

pub use session::{login, logout, token, whoami};

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use memogenius::api::ApiClient;
use memogenius::config::MemoConfig;
use memogenius::notify::{Level, NotificationQueue};
use memogenius::session::{FileTokenStore, Session};

/// Open the session persisted under the configured session path.
pub fn open_session(config: &MemoConfig) -> Result<Session> {
    let api = ApiClient::new(&config.api).context("failed to build API client")?;
    let store = FileTokenStore::new(config.resolved_session_path());
    let mut session = Session::open(api, store);
    session
        .restore()
        .context("failed to read the stored session")?;
    Ok(session)
}

/// Like [`open_session`], but fail unless a login was restored.
pub fn require_session(config: &MemoConfig) -> Result<Session> {
    let session = open_session(config)?;
    anyhow::ensure!(
        session.is_authenticated(),
        "not logged in. Get an access key from the MemoGenius bot and run `memogenius login <KEY>`."
    );
    Ok(session)
}

/// Queue shared with a resource; drained to stderr after each operation.
pub fn notification_queue() -> (NotificationQueue, Arc<NotificationQueue>) {
    let queue = NotificationQueue::new();
    (queue.clone(), Arc::new(queue))
}

pub fn print_notifications(queue: &NotificationQueue) {
    for notification in queue.drain() {
        let tag = match notification.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        eprintln!("[{tag}] {}", notification.message);
    }
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
