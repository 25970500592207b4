// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Reverso Context client
//!
//! An async client for the Reverso Context web service: translations,
//! usage examples, search suggestions and, for logged-in users, saved
//! favorites and search history.
//!
//! ## Features
//!
//! - **Lazy paging**: samples, favorites and history are `Stream`s that
//!   fetch the next page only when the previous one is consumed
//! - **Form login**: antiforgery token handshake, run once per client
//! - **Cleanup**: inline markup stripped from returned texts on request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use reverso_context::{ClientConfig, ContextClient, Result, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder().languages("de", "en").build();
//!     let client = ContextClient::new(config)?;
//!
//!     let words = client.get_translations(&SearchQuery::new("braucht")).await?;
//!     println!("{words:?}");
//!
//!     let samples: Vec<_> = client
//!         .get_translation_samples(&SearchQuery::new("braucht"))
//!         .try_collect()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ContextClient                       │
//! │  translations  samples  suggestions  favorites  history  │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴──────┬──────────────────────┐
//! │   Session    │    Login Flow      │     Pagination       │
//! ├──────────────┼────────────────────┼──────────────────────┤
//! │ Cookie jar   │ Verification token │ Page number (npages) │
//! │ Headers      │ Form submit        │ Offset (start/length)│
//! │ Timeout      │ Redirect check     │                      │
//! └──────────────┴────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP session with cookie jar and default headers
pub mod http;

/// Login handshake
pub mod auth;

/// Pagination strategies
pub mod pagination;

/// Markup cleanup and result normalization
pub mod normalize;

/// Reverso Context endpoints
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use api::{ContextClient, FavoriteEntry, HistoryEntry, ListQuery, SearchQuery, TranslationSample};
pub use config::{ClientConfig, LoginConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
