//! The reminder collection.
//!
//! Local state changes only after the server confirms a request. Confirmed
//! records win over whatever is held locally (last write wins); there is no
//! optimistic insert and no rollback path.

use std::sync::Arc;

use super::LoadState;
use crate::api::types::{Reminder, ReminderDraft};
use crate::api::{ApiError, ScopedClient};
use crate::notify::Notifier;
use crate::session::SessionScope;

pub struct ReminderList {
    reminders: Vec<Reminder>,
    state: LoadState,
    page_size: u32,
    notifier: Arc<dyn Notifier>,
}

impl ReminderList {
    pub fn new(notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        Self {
            reminders: Vec::new(),
            state: LoadState::Idle,
            page_size,
            notifier,
        }
    }

    /// Replace the collection with the first page from the server.
    pub async fn list(&mut self, session: &impl SessionScope) -> bool {
        let Some(scope) = scope_or_skip(session, "list") else {
            return false;
        };
        tracing::debug!(user_id = %scope.user_id(), "fetching reminders");

        let page_size = self.page_size;
        match self.run(scope.list_reminders(0, page_size)).await {
            Ok(reminders) => {
                tracing::debug!(count = reminders.len(), "reminders fetched");
                self.reminders = reminders;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching reminders");
                self.notifier.error("Could not load reminders");
                false
            }
        }
    }

    /// Fetch one reminder and reconcile it into the collection.
    pub async fn get(&mut self, session: &impl SessionScope, id: i64) -> bool {
        let Some(scope) = scope_or_skip(session, "get") else {
            return false;
        };
        match self.run(scope.get_reminder(id)).await {
            Ok(reminder) => {
                self.reconcile(reminder);
                true
            }
            Err(e) => {
                if e.is_not_found() {
                    self.remove_local(id);
                }
                tracing::error!(id, error = %e, "error fetching reminder");
                self.notifier.error("Could not load the reminder");
                false
            }
        }
    }

    pub async fn create(&mut self, session: &impl SessionScope, draft: &ReminderDraft) -> bool {
        let Some(scope) = scope_or_skip(session, "create") else {
            return false;
        };
        match self.run(scope.create_reminder(draft)).await {
            Ok(created) => {
                tracing::info!(id = created.id, "reminder created");
                self.reconcile(created);
                self.notifier.success("Reminder created");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error creating reminder");
                self.notifier.error("Could not create the reminder");
                false
            }
        }
    }

    pub async fn update(
        &mut self,
        session: &impl SessionScope,
        id: i64,
        draft: &ReminderDraft,
    ) -> bool {
        let Some(scope) = scope_or_skip(session, "update") else {
            return false;
        };
        match self.run(scope.update_reminder(id, draft)).await {
            Ok(updated) => {
                tracing::info!(id, "reminder updated");
                self.reconcile(updated);
                self.notifier.success("Reminder updated");
                true
            }
            Err(e) => {
                tracing::error!(id, error = %e, "error updating reminder");
                self.notifier.error("Could not update the reminder");
                false
            }
        }
    }

    /// Delete on the server, then drop the local copy if one is held.
    pub async fn delete(&mut self, session: &impl SessionScope, id: i64) -> bool {
        let Some(scope) = scope_or_skip(session, "delete") else {
            return false;
        };
        match self.run(scope.delete_reminder(id)).await {
            Ok(_) => {
                tracing::info!(id, "reminder deleted");
                self.remove_local(id);
                self.notifier.success("Reminder deleted");
                true
            }
            Err(e) => {
                tracing::error!(id, error = %e, "error deleting reminder");
                self.notifier.error("Could not delete the reminder");
                false
            }
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn find(&self, id: i64) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Track `Loading` for the duration of one request.
    async fn run<T>(
        &mut self,
        request: impl std::future::Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        self.state = LoadState::Loading;
        let result = request.await;
        self.state = LoadState::Idle;
        result
    }

    /// Apply a server-confirmed record: replace by id, or append if unseen.
    fn reconcile(&mut self, confirmed: Reminder) {
        match self.reminders.iter_mut().find(|r| r.id == confirmed.id) {
            Some(existing) => *existing = confirmed,
            None => self.reminders.push(confirmed),
        }
    }

    fn remove_local(&mut self, id: i64) {
        self.reminders.retain(|r| r.id != id);
    }
}

fn scope_or_skip<'s>(session: &'s impl SessionScope, op: &str) -> Option<ScopedClient<'s>> {
    let scope = session.scope();
    if scope.is_none() {
        tracing::debug!(op, "reminder operation skipped: not logged in");
    }
    scope
}
