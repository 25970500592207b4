//! HTTP session
//!
//! The single point of I/O for the client. Wraps a `reqwest::Client` and
//! adds what every call to Reverso needs:
//! - A persistent cookie jar shared by all requests
//! - Default headers, with per-request overrides and suppression
//! - A fixed per-request timeout
//! - Status validation and detection of errors embedded in JSON bodies
//! - The login state (see [`Session::login`])

use crate::auth::LoginFlow;
use crate::config::{ClientConfig, LoginConfig};
use crate::error::{Error, Result};
use crate::types::{Credentials, JsonObject};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers (override session defaults of the same name)
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Request body (URL-encoded form), used instead of `body` when set
    pub form: Option<Vec<(String, String)>>,
    /// Session default headers to leave out of this request (lowercase)
    pub suppressed: HashSet<String>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add every entry of a JSON object as a query parameter
    #[must_use]
    pub fn query_object(mut self, params: JsonObject) -> Self {
        for (key, value) in params {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.query.insert(key, value);
        }
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Leave a session default header out of this request
    #[must_use]
    pub fn without_header(mut self, key: &str) -> Self {
        self.suppressed.insert(key.to_ascii_lowercase());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set URL-encoded form body
    #[must_use]
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

/// HTTP session with cookies, default headers and login state
pub struct Session {
    client: Client,
    jar: Arc<Jar>,
    default_headers: HashMap<String, String>,
    timeout: Duration,
    credentials: Option<Credentials>,
    login_config: LoginConfig,
    /// Serializes logins; `true` once a login succeeded
    logged_in: Mutex<bool>,
}

impl Session {
    /// Create a session from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            client,
            jar,
            default_headers: config.headers.clone(),
            timeout: config.timeout(),
            credentials: config.credentials.clone(),
            login_config: config.login.clone(),
            logged_in: Mutex::new(false),
        })
    }

    /// Check whether the jar holds a cookie with this name for `url`
    pub fn has_cookie(&self, url: &Url, name: &str) -> bool {
        let Some(header) = self.jar.cookies(url) else {
            return false;
        };
        let Ok(header) = header.to_str() else {
            return false;
        };
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(cookie_name, value)| cookie_name == name && !value.is_empty())
    }

    /// Whether a login has succeeded on this session
    pub async fn is_logged_in(&self) -> bool {
        *self.logged_in.lock().await
    }

    /// Make a request, failing on a non-2xx final status
    pub async fn request(&self, method: Method, url: &str, config: RequestConfig) -> Result<Response> {
        let mut req = self.client.request(method.clone(), url);

        // Default headers, unless suppressed or overridden for this request
        for (key, value) in &self.default_headers {
            let lower = key.to_ascii_lowercase();
            let overridden = config
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(key));
            if overridden || config.suppressed.contains(&lower) {
                continue;
            }
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref form) = config.form {
            req = req.form(form);
        } else if let Some(ref body) = config.body {
            req = req.json(body);
        }

        req = req.timeout(self.timeout);

        debug!("Sending request: {} {}", method, url);
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed with {}: {} {}", status.as_u16(), method, url);
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {} {} -> {}", method, url, response.url());
        Ok(response)
    }

    /// Make a request and decode the body as JSON
    ///
    /// Reverso reports some failures inside a 200 response; a decoded object
    /// with an `error` key becomes [`Error::Remote`].
    pub async fn json_request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Value> {
        let response = self.request(method, url, config).await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        let contents: Value = serde_json::from_str(&body)?;
        if let Some(error) = contents.get("error") {
            return Err(Error::Remote {
                error: error.clone(),
                status,
                url: final_url,
                body,
            });
        }
        Ok(contents)
    }

    /// Log in with the configured credentials
    ///
    /// Does nothing once a login has succeeded. The flag is not revalidated
    /// against the server. A failed login leaves the session logged out, so
    /// the caller may try again.
    pub async fn login(&self) -> Result<()> {
        let mut logged_in = self.logged_in.lock().await;
        if *logged_in {
            debug!("Session already logged in");
            return Ok(());
        }

        let credentials = self.credentials.as_ref().ok_or(Error::MissingCredentials)?;
        let mut flow = LoginFlow::new(self, &self.login_config);
        flow.run(credentials).await?;

        *logged_in = true;
        Ok(())
    }
}
