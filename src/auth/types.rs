//! Login flow types

use std::fmt;

/// Name of the hidden form field carrying the verification token
pub const VERIFICATION_TOKEN_FIELD: &str = "__RequestVerificationToken";

/// Progress of a single login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginState {
    /// Nothing sent yet
    #[default]
    NotStarted,
    /// Login page fetched and verification token extracted
    TokenFetched,
    /// Credentials posted
    Submitted,
    /// Final URL matched the return URL
    LoggedIn,
    /// Any step failed
    Failed,
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not_started",
            Self::TokenFetched => "token_fetched",
            Self::Submitted => "submitted",
            Self::LoggedIn => "logged_in",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One-time CSRF token scraped from the login form
///
/// Consumed by the credential submission of the same attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    /// Wrap a raw token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the raw token value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationToken({} chars)", self.0.len())
    }
}
