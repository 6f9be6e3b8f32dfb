//! Session value types.
//!
//! [`DeviceToken`] is the anonymous per-install identifier, [`Credential`] the
//! bearer secret returned by the web-login exchange, and [`UserId`] the resolved
//! account identity that gates every authenticated call.

use serde::{Deserialize, Serialize};

/// Storage key holding the device token, later overwritten by the credential.
pub const WEB_TOKEN_KEY: &str = "webToken";

/// Storage key mirroring the resolved user id across process restarts.
pub const USER_ID_KEY: &str = "userId";

/// Opaque random identifier generated once per install.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceToken(String);

impl DeviceToken {
    /// Generate a fresh, globally unique token (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DeviceToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bearer credential issued by a successful access-key exchange.
///
/// `Debug` is redacted so the secret never ends up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Numeric account id returned by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("invalid user id: {s}"))
    }
}

/// Whether `key` looks like a bot-issued access key (`MG-XXXX-XXXX`).
pub fn looks_like_access_key(key: &str) -> bool {
    let Some(rest) = key.strip_prefix("MG-") else {
        return false;
    };
    let mut parts = rest.split('-');
    let valid = |p: Option<&str>| {
        p.is_some_and(|p| {
            p.len() == 4
                && p.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
    };
    valid(parts.next()) && valid(parts.next()) && parts.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_distinct() {
        assert_ne!(DeviceToken::generate(), DeviceToken::generate());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("super-secret");
        assert_eq!(format!("{cred:?}"), "Credential(***)");
        assert_eq!(cred.bearer(), "Bearer super-secret");
    }

    #[test]
    fn parse_user_id() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId(42));
        assert!("forty-two".parse::<UserId>().is_err());
    }

    #[test]
    fn access_key_shape() {
        assert!(looks_like_access_key("MG-AB12-9XYZ"));
        assert!(!looks_like_access_key("MG-VALID"));
        assert!(!looks_like_access_key("mg-ab12-9xyz"));
        assert!(!looks_like_access_key("MG-AB12-9XYZ-0000"));
    }
}
