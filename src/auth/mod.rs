//! Authentication module
//!
//! Implements the CSRF-guarded form login of the Reverso account service.
//!
//! The `LoginFlow` runs one attempt; `Session::login` decides whether an
//! attempt is needed at all.

mod login;
mod types;

pub use login::{extract_verification_token, LoginFlow};
pub use types::{LoginState, VerificationToken, VERIFICATION_TOKEN_FIELD};

#[cfg(test)]
mod tests;
