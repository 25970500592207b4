//! Endpoint client module
//!
//! Exposes the Reverso Context operations:
//! - `get_translations` - translations of a word, single request
//! - `get_translation_samples` - paged usage examples
//! - `get_search_suggestions` - completions, optionally fuzzy
//! - `get_favorites` / `get_history` - paged per-user lists (login required)

mod client;
mod types;

pub use client::ContextClient;
pub use types::{
    FavoriteEntry, HistoryEntry, ListQuery, SearchQuery, TranslationSample,
};
