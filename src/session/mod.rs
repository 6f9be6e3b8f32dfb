//! Client-side session lifecycle.
//!
//! - [`types`] — device token, credential and user id
//! - [`store`] — persistent key/value storage ([`TokenStore`])
//! - [`manager`] — the [`Session`] that ties them to the login endpoint

pub mod manager;
pub mod store;
pub mod types;

pub use manager::{LoginError, Session};
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
pub use types::{Credential, DeviceToken, UserId};

use crate::api::ScopedClient;

/// Read-only view of a session, as seen by the resources.
///
/// Resources never mutate session state; they only ask for a client scoped
/// to the current identity.
pub trait SessionScope {
    /// A client bound to the resolved identity, or `None` when logged out.
    fn scope(&self) -> Option<ScopedClient<'_>>;
}
