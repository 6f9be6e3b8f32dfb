//! Wire types for the MemoGenius REST API.

use serde::{Deserialize, Serialize};

use crate::session::types::UserId;

/// Body of `POST /auth/web-login`.
#[derive(Debug, Serialize)]
pub struct WebLoginRequest<'a> {
    pub access_key: &'a str,
    pub web_token: &'a str,
}

/// Relevant part of the user record returned by `POST /auth/web-login`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebLoginResponse {
    pub web_token: String,
    pub id: i64,
}

/// Body of `POST /chat/message`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Reply from `POST /chat/message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub text: String,
}

/// A reminder as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub text: String,
    /// ISO 8601 due date.
    pub due_date: String,
    pub is_active: bool,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-modification timestamp, absent until first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// User-editable reminder fields, sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderDraft {
    pub text: String,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ReminderDraft {
    pub fn new(text: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            due_date: due_date.into(),
            is_active: None,
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// A [`ReminderDraft`] scoped to its owner.
#[derive(Debug, Serialize)]
pub struct ScopedReminder<'a> {
    #[serde(flatten)]
    pub draft: &'a ReminderDraft,
    pub user_id: UserId,
}

/// Query string for `GET /reminders/`.
#[derive(Debug, Serialize)]
pub struct ListQuery {
    pub user_id: UserId,
    pub skip: u32,
    pub limit: u32,
}

/// Query string carrying only the owner.
#[derive(Debug, Serialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_reminder_flattens_draft() {
        let draft = ReminderDraft::new("Buy milk", "2024-01-01T10:00:00Z");
        let body = serde_json::to_value(ScopedReminder {
            draft: &draft,
            user_id: UserId(42),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "text": "Buy milk",
                "due_date": "2024-01-01T10:00:00Z",
                "user_id": 42
            })
        );
    }

    #[test]
    fn reminder_without_updated_at_parses() {
        let reminder: Reminder = serde_json::from_value(serde_json::json!({
            "id": 3,
            "text": "Call mom",
            "due_date": "2024-03-01T09:00:00",
            "is_active": true,
            "created_at": "2024-02-01T09:00:00",
            "user_id": 42
        }))
        .unwrap();
        assert_eq!(reminder.id, 3);
        assert_eq!(reminder.updated_at, None);
    }
}
