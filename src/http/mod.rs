//! HTTP session module
//!
//! Provides the session every Reverso call goes through.
//!
//! # Features
//!
//! - **Cookie Persistence**: One cookie jar for the lifetime of the session
//! - **Default Headers**: Browser-like headers, overridable per request
//! - **Error Detection**: Non-2xx statuses and `error` keys in JSON bodies
//! - **Login State**: Idempotent login backed by the auth module

mod session;

pub use reqwest::Method;
pub use session::{RequestConfig, Session};
