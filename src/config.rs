use std::fmt;

use url::Url;

use crate::error::RetroError;

pub const API_URL: &str = "https://ra.hfc-essentials.com";

pub const USERNAME_VAR: &str = "RA_USERNAME";
pub const API_KEY_VAR: &str = "RA_API_KEY";
pub const BASE_URL_VAR: &str = "RA_BASE_URL";

/// Credentials and endpoint for a [`crate::RetroClient`]. Fixed for the client's lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    username: String,
    api_key: String,
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at another origin, e.g. a local proxy.
    /// Resource paths are resolved relative to this URL, so a base with a path should end in `/`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Reads `RA_USERNAME`, `RA_API_KEY` and the optional `RA_BASE_URL`.
    pub fn from_env() -> Result<Self, RetroError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RetroError> {
        let username = lookup(USERNAME_VAR).ok_or(RetroError::MissingCredential(USERNAME_VAR))?;
        let api_key = lookup(API_KEY_VAR).ok_or(RetroError::MissingCredential(API_KEY_VAR))?;

        let mut config = Self::new(username, api_key);
        if let Some(base) = lookup(BASE_URL_VAR) {
            config.base_url = Url::parse(&base)?;
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn default_base_url() -> Url {
    Url::parse(API_URL).expect("API_URL is a valid URL")
}
