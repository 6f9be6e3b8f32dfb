//! Session-scoped resources: the chat thread and the reminder collection.
//!
//! Both read the identity through [`crate::session::SessionScope`] and never
//! change session state. Each runs one request at a time (`&mut self`) and
//! reports outcomes through a [`crate::notify::Notifier`].

pub mod chat;
pub mod reminders;

pub use chat::{ChatLog, ChatMessage, Sender};
pub use reminders::ReminderList;

/// Per-resource request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}
