//! Form login handshake
//!
//! The account service has no API login. The flow mimics a browser:
//! 1. GET the login page, scrape the hidden `__RequestVerificationToken`
//! 2. Check the antiforgery cookie the page set
//! 3. POST the credentials and token as a form
//! 4. Treat the final URL after redirects as the outcome
//!
//! The service answers 200 on a failed login too, so step 4 compares the
//! final URL with the configured return URL. Nothing is retried here.

use super::types::{LoginState, VerificationToken, VERIFICATION_TOKEN_FIELD};
use crate::config::LoginConfig;
use crate::error::{Error, Result};
use crate::http::{Method, RequestConfig, Session};
use crate::types::Credentials;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

/// Default headers the login endpoint rejects or chokes on
const SUPPRESSED_LOGIN_HEADERS: [&str; 4] = [
    "X-Requested-With",
    "Accept-Encoding",
    "Connection",
    "Content-Length",
];

/// A single login attempt over a session
pub struct LoginFlow<'a> {
    session: &'a Session,
    config: &'a LoginConfig,
    state: LoginState,
}

impl<'a> LoginFlow<'a> {
    /// Create a login attempt
    pub fn new(session: &'a Session, config: &'a LoginConfig) -> Self {
        Self {
            session,
            config,
            state: LoginState::NotStarted,
        }
    }

    /// Current state of the attempt
    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Run the handshake to completion
    pub async fn run(&mut self, credentials: &Credentials) -> Result<()> {
        let result = self.drive(credentials).await;
        match &result {
            Ok(()) => info!("Logged in to Reverso as {}", credentials.email),
            Err(e) => {
                warn!("Login failed in state {}: {}", self.state, e);
                self.transition(LoginState::Failed);
            }
        }
        result
    }

    async fn drive(&mut self, credentials: &Credentials) -> Result<()> {
        let login_url = Url::parse(&self.config.login_url)?;
        let return_url = Url::parse(&self.config.return_url)?;

        let token = self.fetch_token(&login_url).await?;
        self.transition(LoginState::TokenFetched);

        if !self
            .session
            .has_cookie(&login_url, &self.config.antiforgery_cookie)
        {
            return Err(Error::auth(format!(
                "missing antiforgery cookie '{}'",
                self.config.antiforgery_cookie
            )));
        }

        let final_url = self.submit(&login_url, credentials, token).await?;
        self.transition(LoginState::Submitted);

        if final_url != return_url {
            return Err(Error::auth(format!(
                "invalid credentials or unexpected redirect: landed on {final_url}, expected {return_url}"
            )));
        }

        self.transition(LoginState::LoggedIn);
        Ok(())
    }

    async fn fetch_token(&self, login_url: &Url) -> Result<VerificationToken> {
        let response = self
            .session
            .request(
                Method::GET,
                login_url.as_str(),
                RequestConfig::new()
                    .query("returnUrl", &self.config.return_url)
                    .query("lang", &self.config.lang),
            )
            .await?;
        let html = response.text().await?;

        extract_verification_token(&html)?.ok_or_else(|| {
            Error::auth(format!("token not found: no {VERIFICATION_TOKEN_FIELD} in login page"))
        })
    }

    async fn submit(
        &self,
        login_url: &Url,
        credentials: &Credentials,
        token: VerificationToken,
    ) -> Result<Url> {
        let origin = login_url.origin().ascii_serialization();

        let mut config = RequestConfig::new()
            .query("returnUrl", &self.config.return_url)
            .form([
                ("Email", credentials.email.clone()),
                ("Password", credentials.password.clone()),
                ("RememberMe", "true".to_string()),
                (VERIFICATION_TOKEN_FIELD, token.into_inner()),
            ])
            .header("authority", origin.clone())
            .header("origin", origin)
            .header("referer", login_url.as_str())
            .header("sec-fetch-site", "same-origin")
            .header("sec-fetch-mode", "navigate")
            .header("sec-fetch-user", "?1")
            .header("sec-fetch-dest", "document");
        for header in SUPPRESSED_LOGIN_HEADERS {
            config = config.without_header(header);
        }

        let response = self
            .session
            .request(Method::POST, login_url.as_str(), config)
            .await?;
        Ok(response.url().clone())
    }

    fn transition(&mut self, next: LoginState) {
        debug!("Login state: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Find the hidden verification token input in a login page
///
/// Returns `Ok(None)` when the page has no such input.
pub fn extract_verification_token(html: &str) -> Result<Option<VerificationToken>> {
    let selector = Selector::parse(&format!(
        r#"input[name="{VERIFICATION_TOKEN_FIELD}"][type="hidden"]"#
    ))
    .map_err(|e| Error::decode(format!("invalid token selector: {e:?}")))?;

    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(VerificationToken::new))
}
