//! CLI module
//!
//! Command-line interface over [`ContextClient`](crate::api::ContextClient).
//!
//! # Commands
//!
//! - `translations` - Translations of a word
//! - `samples` - Usage examples, streamed page by page
//! - `suggestions` - Search completions
//! - `favorites` / `history` - Per-user lists (login required)
//! - `login` - Check credentials

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
