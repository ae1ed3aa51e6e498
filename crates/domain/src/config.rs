//! Client configuration structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Settings for connecting to an Nfield server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base address, e.g. `https://api.nfieldmr.com/v1`
    pub server_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            credentials: None,
        }
    }
}

/// Sign-in credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub domain: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        domain: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { domain: domain.into(), username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let credentials = Credentials::new("D", "U", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"server_url": "http://x/"}"#).unwrap();
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(config.user_agent.is_none());
        assert!(config.credentials.is_none());
    }
}
