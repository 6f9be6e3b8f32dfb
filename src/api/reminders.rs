use reqwest::Method;

use super::types::{ListQuery, Reminder, ReminderDraft, ScopedReminder, UserQuery};
use super::{ApiError, ScopedClient};

const REMINDERS_PATH: &str = "/reminders/";

fn reminder_path(id: i64) -> String {
    format!("/reminders/{id}")
}

impl ScopedClient<'_> {
    pub async fn list_reminders(&self, skip: u32, limit: u32) -> Result<Vec<Reminder>, ApiError> {
        let request = self.request(Method::GET, REMINDERS_PATH).query(&ListQuery {
            user_id: self.user_id(),
            skip,
            limit,
        });
        self.send_json(REMINDERS_PATH, request).await
    }

    pub async fn get_reminder(&self, id: i64) -> Result<Reminder, ApiError> {
        let path = reminder_path(id);
        let request = self.request(Method::GET, &path).query(&UserQuery {
            user_id: self.user_id(),
        });
        self.send_json(&path, request).await
    }

    pub async fn create_reminder(&self, draft: &ReminderDraft) -> Result<Reminder, ApiError> {
        let request = self
            .request(Method::POST, REMINDERS_PATH)
            .json(&ScopedReminder {
                draft,
                user_id: self.user_id(),
            });
        self.send_json(REMINDERS_PATH, request).await
    }

    pub async fn update_reminder(
        &self,
        id: i64,
        draft: &ReminderDraft,
    ) -> Result<Reminder, ApiError> {
        let path = reminder_path(id);
        let request = self.request(Method::PUT, &path).json(&ScopedReminder {
            draft,
            user_id: self.user_id(),
        });
        self.send_json(&path, request).await
    }

    /// Delete a reminder. The acknowledgment body is returned as-is; the
    /// backend currently echoes the deleted record.
    pub async fn delete_reminder(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        let path = reminder_path(id);
        let request = self.request(Method::DELETE, &path).query(&UserQuery {
            user_id: self.user_id(),
        });
        self.send_ack(&path, request).await
    }
}
