//! CLI commands for the session lifecycle: `login`, `logout`, `whoami`, `token`.

use anyhow::{Context, Result};

use memogenius::config::MemoConfig;
use memogenius::session::{LoginError, Session};

use super::{open_session, spinner};

/// Exchange an access key for a session and persist it.
pub async fn login(config: &MemoConfig, access_key: &str) -> Result<()> {
    let mut session = open_session(config)?;
    if let Some(user_id) = session.user_id() {
        println!("Already logged in as user {user_id}; replacing the session.");
    }

    let pb = spinner("logging in...");
    let result = session.try_login(access_key).await;
    pb.finish_and_clear();

    match result {
        Ok(user_id) => {
            println!("Logged in as user {user_id}.");
            Ok(())
        }
        Err(LoginError::EmptyAccessKey) => anyhow::bail!("access key must not be empty"),
        Err(e) => {
            tracing::debug!(error = %e, "login failed");
            anyhow::bail!("login failed: invalid access key or server unreachable")
        }
    }
}

pub fn logout(config: &MemoConfig) -> Result<()> {
    let mut session = open_session(config)?;
    session.logout();
    println!("Logged out.");
    Ok(())
}

pub fn whoami(config: &MemoConfig) -> Result<()> {
    let session = open_session(config)?;
    match session.user_id() {
        Some(user_id) => println!("User {user_id} at {}", session.api().base_url()),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn token(config: &MemoConfig) -> Result<()> {
    let session = open_session(config)?;
    println!("{}", device_token_line(&session)?);
    Ok(())
}

/// What `token` prints. Once logged in the stored token is the bearer
/// credential and is never echoed.
fn device_token_line(session: &Session) -> Result<String> {
    let token = session
        .displayable_device_token()
        .context("failed to read or create the device token")?;
    Ok(match token {
        Some(token) => token.to_string(),
        None => "Logged in; the stored token is the session credential and is not shown.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memogenius::api::ApiClient;
    use memogenius::session::types::{USER_ID_KEY, WEB_TOKEN_KEY};
    use memogenius::session::{MemoryTokenStore, TokenStore};

    fn session_over(store: MemoryTokenStore) -> Session {
        let api = ApiClient::with_base_url("http://127.0.0.1:9").unwrap();
        let mut session = Session::open(api, store);
        session.restore().unwrap();
        session
    }

    #[test]
    fn token_prints_device_token_before_login() {
        let store = MemoryTokenStore::new();
        let line = device_token_line(&session_over(store.clone())).unwrap();
        assert_eq!(Some(line), store.get(WEB_TOKEN_KEY).unwrap());
    }

    #[test]
    fn token_never_prints_the_credential() {
        let store = MemoryTokenStore::new();
        store.set(WEB_TOKEN_KEY, "secret-credential").unwrap();
        store.set(USER_ID_KEY, "42").unwrap();

        let line = device_token_line(&session_over(store.clone())).unwrap();
        assert!(!line.contains("secret-credential"));
        assert!(line.starts_with("Logged in"));
        assert_eq!(
            store.get(WEB_TOKEN_KEY).unwrap().as_deref(),
            Some("secret-credential")
        );
    }
}
