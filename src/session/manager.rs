//! The session manager.
//!
//! [`Session`] exclusively owns the device token and credential. It reads and
//! writes them through a [`TokenStore`] and hands out [`ScopedClient`]s to the
//! resources once an identity is resolved.

use thiserror::Error;

use super::store::{StoreError, TokenStore};
use super::types::{
    looks_like_access_key, Credential, DeviceToken, UserId, USER_ID_KEY, WEB_TOKEN_KEY,
};
use super::SessionScope;
use crate::api::{ApiClient, ApiError, ScopedClient};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("access key is empty")]
    EmptyAccessKey,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Session {
    api: ApiClient,
    store: Box<dyn TokenStore>,
    credential: Option<Credential>,
    user_id: Option<UserId>,
}

impl Session {
    /// Build a logged-out session. Call [`Session::restore`] to pick up a
    /// previously persisted login.
    pub fn open(api: ApiClient, store: impl TokenStore + 'static) -> Self {
        Self {
            api,
            store: Box::new(store),
            credential: None,
            user_id: None,
        }
    }

    /// Adopt a credential and identity persisted by an earlier login.
    ///
    /// A stored token is always adopted as the bearer credential. The
    /// identity is resolved only from a well-formed mirrored user id. Returns
    /// whether an identity was restored.
    pub fn restore(&mut self) -> Result<bool, StoreError> {
        let Some(token) = self.store.get(WEB_TOKEN_KEY)? else {
            return Ok(false);
        };
        self.credential = Some(Credential::new(token));

        let Some(raw_id) = self.store.get(USER_ID_KEY)? else {
            tracing::debug!("stored token has no user id, identity stays unresolved");
            return Ok(false);
        };
        let user_id = match raw_id.parse::<UserId>() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed stored user id");
                return Ok(false);
            }
        };

        self.user_id = Some(user_id);
        tracing::info!(user_id = %user_id, "session restored");
        Ok(true)
    }

    /// Return this install's device token, generating and persisting one on
    /// first use. Never replaces an existing token.
    pub fn ensure_device_token(&self) -> Result<DeviceToken, StoreError> {
        if let Some(existing) = self.store.get(WEB_TOKEN_KEY)? {
            return Ok(DeviceToken::from(existing));
        }
        let token = DeviceToken::generate();
        self.store.set(WEB_TOKEN_KEY, token.as_str())?;
        tracing::info!("generated new device token");
        Ok(token)
    }

    /// Exchange `access_key` for an identity. Failures of any kind are logged
    /// and reported as `false`; state is untouched in that case.
    pub async fn login(&mut self, access_key: &str) -> bool {
        match self.try_login(access_key).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                false
            }
        }
    }

    /// Like [`Session::login`] but returns the failure cause.
    pub async fn try_login(&mut self, access_key: &str) -> Result<UserId, LoginError> {
        let access_key = access_key.trim();
        if access_key.is_empty() {
            return Err(LoginError::EmptyAccessKey);
        }
        if !looks_like_access_key(access_key) {
            tracing::warn!("access key does not look like MG-XXXX-XXXX, sending anyway");
        }

        // A missing token is generated here but only persisted once the
        // exchange succeeds.
        let device_token = match self.store.get(WEB_TOKEN_KEY)? {
            Some(existing) => DeviceToken::from(existing),
            None => DeviceToken::generate(),
        };

        let response = self.api.web_login(access_key, &device_token).await?;
        let user_id = UserId(response.id);

        self.persist_login(&response.web_token, user_id)?;

        self.credential = Some(Credential::new(response.web_token));
        self.user_id = Some(user_id);
        tracing::info!(user_id = %user_id, "logged in");
        Ok(user_id)
    }

    /// Write both entries or neither.
    fn persist_login(&self, web_token: &str, user_id: UserId) -> Result<(), StoreError> {
        let previous_token = self.store.get(WEB_TOKEN_KEY)?;

        self.store.set(WEB_TOKEN_KEY, web_token)?;
        if let Err(e) = self.store.set(USER_ID_KEY, &user_id.to_string()) {
            let rollback = match previous_token {
                Some(token) => self.store.set(WEB_TOKEN_KEY, &token),
                None => self.store.remove(WEB_TOKEN_KEY),
            };
            if let Err(rollback_err) = rollback {
                tracing::error!(error = %rollback_err, "failed to roll back token store");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Forget the credential, identity and device token. Safe to call when
    /// not logged in.
    pub fn logout(&mut self) {
        for key in [WEB_TOKEN_KEY, USER_ID_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear token store entry");
            }
        }
        let was_logged_in = self.user_id.take().is_some();
        self.credential = None;
        if was_logged_in {
            tracing::info!("logged out");
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The device token, unless a login has replaced it with a credential.
    ///
    /// A login mirrors the user id next to the token entry, so a stored user
    /// id (well-formed or not) marks the entry as a bearer credential.
    pub fn displayable_device_token(&self) -> Result<Option<DeviceToken>, StoreError> {
        if self.user_id.is_some() || self.store.get(USER_ID_KEY)?.is_some() {
            return Ok(None);
        }
        self.ensure_device_token().map(Some)
    }
}

impl SessionScope for Session {
    fn scope(&self) -> Option<ScopedClient<'_>> {
        match (&self.credential, self.user_id) {
            (Some(credential), Some(user_id)) => {
                Some(ScopedClient::new(&self.api, credential, user_id))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.api.base_url())
            .field("credential", &self.credential)
            .field("user_id", &self.user_id)
            .finish()
    }
}
