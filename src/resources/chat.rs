use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::LoadState;
use crate::notify::Notifier;
use crate::session::SessionScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// An append-only chat thread for the lifetime of one view.
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    state: LoadState,
    notifier: Arc<dyn Notifier>,
}

impl ChatLog {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            messages: Vec::new(),
            state: LoadState::Idle,
            notifier,
        }
    }

    /// Send `text` and wait for the single reply.
    ///
    /// The outgoing message is appended before the request is issued and
    /// stays even if the request fails. Returns the reply on success. Without
    /// a resolved identity, or with blank text, nothing is sent or recorded.
    pub async fn send_message(
        &mut self,
        session: &impl SessionScope,
        text: &str,
    ) -> Option<&ChatMessage> {
        let Some(scope) = session.scope() else {
            tracing::warn!("chat message dropped: not logged in");
            return None;
        };
        if text.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::new(Sender::User, text));
        self.state = LoadState::Loading;
        let result = scope.send_chat_message(text).await;
        self.state = LoadState::Idle;

        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::new(Sender::Bot, reply.text));
                self.messages.last()
            }
            Err(e) => {
                tracing::error!(error = %e, "error sending chat message");
                self.notifier.error("Could not reach the assistant");
                None
            }
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> LoadState {
        self.state
    }
}
