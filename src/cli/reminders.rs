//! CLI `reminders` subcommands.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use clap::Subcommand;

use memogenius::api::types::{Reminder, ReminderDraft};
use memogenius::config::MemoConfig;
use memogenius::resources::ReminderList;

use super::{notification_queue, print_notifications, require_session};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// List reminders
    List,
    /// Show one reminder
    Show { id: i64 },
    /// Create a reminder
    Add {
        /// What to be reminded of
        #[arg(long)]
        text: String,
        /// Due date: RFC 3339 or "YYYY-MM-DD HH:MM" (UTC)
        #[arg(long)]
        due: String,
        /// Create the reminder disabled
        #[arg(long)]
        inactive: bool,
    },
    /// Change a reminder; unspecified fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a reminder
    Delete { id: i64 },
}

pub async fn run(config: &MemoConfig, action: ReminderAction) -> Result<()> {
    let session = require_session(config)?;
    let (queue, notifier) = notification_queue();
    let mut list = ReminderList::new(notifier, config.reminders.page_size);

    let ok = match action {
        ReminderAction::List => {
            let ok = list.list(&session).await;
            if ok {
                print_list(list.reminders());
            }
            ok
        }
        ReminderAction::Show { id } => {
            let ok = list.get(&session, id).await;
            if let Some(reminder) = list.find(id) {
                print_reminder(reminder);
            }
            ok
        }
        ReminderAction::Add {
            text,
            due,
            inactive,
        } => {
            let mut draft = ReminderDraft::new(text, parse_due_date(&due)?);
            if inactive {
                draft = draft.active(false);
            }
            let ok = list.create(&session, &draft).await;
            if let Some(created) = list.reminders().last().filter(|_| ok) {
                print_reminder(created);
            }
            ok
        }
        ReminderAction::Edit {
            id,
            text,
            due,
            active,
        } => {
            if !list.get(&session, id).await {
                print_notifications(&queue);
                bail!("reminder {id} could not be loaded");
            }
            let current = list
                .find(id)
                .cloned()
                .with_context(|| format!("reminder {id} missing after fetch"))?;
            let due_date = match due {
                Some(due) => parse_due_date(&due)?,
                None => current.due_date.clone(),
            };
            let draft = ReminderDraft::new(text.unwrap_or(current.text), due_date)
                .active(active.unwrap_or(current.is_active));

            let ok = list.update(&session, id, &draft).await;
            if let Some(updated) = list.find(id).filter(|_| ok) {
                print_reminder(updated);
            }
            ok
        }
        ReminderAction::Delete { id } => list.delete(&session, id).await,
    };

    print_notifications(&queue);
    anyhow::ensure!(ok, "reminder operation failed");
    Ok(())
}

/// Normalize a user-supplied due date to ISO 8601 UTC.
pub fn parse_due_date(input: &str) -> Result<String> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }
    bail!("invalid due date {input:?}: expected RFC 3339 or \"YYYY-MM-DD HH:MM\"")
}

fn print_list(reminders: &[Reminder]) {
    if reminders.is_empty() {
        println!("No reminders.");
        return;
    }
    println!("{:>6}  {:<8}  {:<20}  TEXT", "ID", "STATUS", "DUE");
    for reminder in reminders {
        println!(
            "{:>6}  {:<8}  {:<20}  {}",
            reminder.id,
            status(reminder),
            reminder.due_date,
            reminder.text
        );
    }
}

fn print_reminder(reminder: &Reminder) {
    println!("Reminder #{}", reminder.id);
    println!("  Text:      {}", reminder.text);
    println!("  Due:       {}", reminder.due_date);
    println!("  Status:    {}", status(reminder));
    println!("  Created:   {}", reminder.created_at);
    if let Some(ref updated) = reminder.updated_at {
        println!("  Updated:   {updated}");
    }
}

fn status(reminder: &Reminder) -> &'static str {
    if reminder.is_active {
        "active"
    } else {
        "inactive"
    }
}
