//! Client configuration
//!
//! Every tunable the session, login flow and pagers need lives in
//! [`ClientConfig`]. All fields have defaults matching the public Reverso
//! deployment, so a config file only has to name what it overrides.

use crate::error::{Error, Result};
use crate::types::Credentials;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Base URL of the Reverso Context JSON endpoints
pub const DEFAULT_BASE_URL: &str = "https://context.reverso.net/";

/// Account login page
pub const DEFAULT_LOGIN_URL: &str = "https://account.reverso.net/Account/Login";

/// URL the login endpoint redirects to on success
pub const DEFAULT_RETURN_URL: &str = "https://context.reverso.net/";

/// Cookie set by the login page to bind the verification token
pub const DEFAULT_ANTIFORGERY_COOKIE: &str = "Reverso.Account.Antiforgery";

/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.14; rv:77.0) Gecko/20100101 Firefox/77.0";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Page size the favorites/history endpoints are queried with
pub const DEFAULT_PAGE_SIZE: u32 = 50;

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for the JSON endpoints (must end with '/')
    pub base_url: String,

    /// Default source language
    pub source_lang: String,

    /// Default target language
    pub target_lang: String,

    /// Optional login information
    pub credentials: Option<Credentials>,

    /// User agent string
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Headers sent with every request
    pub headers: HashMap<String, String>,

    /// Page size for the favorites endpoint
    pub favorites_page_size: u32,

    /// Page size for the history endpoint
    pub history_page_size: u32,

    /// Login flow settings
    pub login: LoginConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            source_lang: "en".to_string(),
            target_lang: "de".to_string(),
            credentials: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: default_headers(),
            favorites_page_size: DEFAULT_PAGE_SIZE,
            history_page_size: DEFAULT_PAGE_SIZE,
            login: LoginConfig::default(),
        }
    }
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        (
            "Origin".to_string(),
            "https://context.reverso.net".to_string(),
        ),
        ("Accept-Language".to_string(), "en-US,en;q=0.5".to_string()),
        ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
    ])
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load a config from a YAML (or JSON) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Cannot read config file '{}': {e}", path.display()))
        })?;
        Self::from_str(&content)
    }

    /// Parse a config from a YAML (or JSON) string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url()?;
        // Url::join drops the last path segment unless it ends with '/'
        if !base.path().ends_with('/') {
            return Err(Error::config(format!(
                "base_url must end with '/': {}",
                self.base_url
            )));
        }
        Url::parse(&self.login.login_url)?;
        Url::parse(&self.login.return_url)?;

        if self.source_lang.is_empty() || self.target_lang.is_empty() {
            return Err(Error::config("source_lang and target_lang must not be empty"));
        }
        if self.favorites_page_size == 0 || self.history_page_size == 0 {
            return Err(Error::config("page sizes must be greater than zero"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Login Config
// ============================================================================

/// Settings of the form login handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Login page / form endpoint
    pub login_url: String,
    /// Where a successful login redirects to
    pub return_url: String,
    /// Language of the login page
    pub lang: String,
    /// Name of the antiforgery cookie set by the login page
    pub antiforgery_cookie: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            return_url: DEFAULT_RETURN_URL.to_string(),
            lang: "en".to_string(),
            antiforgery_cookie: DEFAULT_ANTIFORGERY_COOKIE.to_string(),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set default source and target languages
    pub fn languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.config.source_lang = source.into();
        self.config.target_lang = target.into();
        self
    }

    /// Set login credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set page sizes for favorites and history
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.favorites_page_size = size;
        self.config.history_page_size = size;
        self
    }

    /// Set the login page URL
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.config.login.login_url = url.into();
        self
    }

    /// Set the expected post-login URL
    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.config.login.return_url = url.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
