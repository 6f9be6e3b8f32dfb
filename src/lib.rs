//! MemoGenius client — chat and reminders on top of the MemoGenius REST API.
//!
//! A user obtains an access key (`MG-XXXX-XXXX`) from the MemoGenius Telegram
//! bot and exchanges it, together with a per-install device token, for a
//! bearer credential and a numeric user id. Everything after that is scoped to
//! that identity.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`session`] — Device token, credential and identity lifecycle, plus persistent storage
//! - [`api`] — HTTP client, wire types and error taxonomy for the REST endpoints
//! - [`resources`] — The chat thread and the reminder collection
//! - [`notify`] — Transient success/error notifications
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use memogenius::api::{types::ReminderDraft, ApiClient};
//! use memogenius::notify::TracingNotifier;
//! use memogenius::resources::ReminderList;
//! use memogenius::session::{FileTokenStore, Session};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = ApiClient::with_base_url("http://localhost:8000/api")?;
//! let mut session = Session::open(api, FileTokenStore::new("session.json"));
//! session.restore()?;
//! if !session.is_authenticated() && !session.login("MG-AB12-CD34").await {
//!     anyhow::bail!("login failed");
//! }
//!
//! let mut reminders = ReminderList::new(Arc::new(TracingNotifier), 100);
//! reminders
//!     .create(&session, &ReminderDraft::new("Buy milk", "2024-01-01T10:00:00Z"))
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod notify;
pub mod resources;
pub mod session;
