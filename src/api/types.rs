//! Query and result types of the Reverso endpoints

use crate::normalize::{cleanup_if, ordered_translations};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Queries
// ============================================================================

/// Parameters of a text search (translations, samples, suggestions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Text to look up
    pub text: String,
    /// Narrow samples down to this translation of `text`
    pub target_text: Option<String>,
    /// Override the client's default source language
    pub source_lang: Option<String>,
    /// Override the client's default target language
    pub target_lang: Option<String>,
    /// Strip inline markup from returned texts
    pub cleanup: bool,
    /// Include fuzzy suggestions (typo tolerant)
    pub fuzzy: bool,
}

impl SearchQuery {
    /// Search for `text` with client defaults, cleanup on, fuzzy off
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_text: None,
            source_lang: None,
            target_lang: None,
            cleanup: true,
            fuzzy: false,
        }
    }

    /// Restrict samples to one translation
    #[must_use]
    pub fn target_text(mut self, target_text: impl Into<String>) -> Self {
        self.target_text = Some(target_text.into());
        self
    }

    /// Override both languages for this call
    #[must_use]
    pub fn languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_lang = Some(source.into());
        self.target_lang = Some(target.into());
        self
    }

    /// Enable or disable markup cleanup
    #[must_use]
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Enable or disable fuzzy suggestions
    #[must_use]
    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }
}

/// Parameters of a per-user list (favorites, history)
///
/// Language values may list several codes separated by commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Override the client's default source language(s)
    pub source_lang: Option<String>,
    /// Override the client's default target language(s)
    pub target_lang: Option<String>,
    /// Strip inline markup from favorite contexts
    pub cleanup: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            source_lang: None,
            target_lang: None,
            cleanup: true,
        }
    }
}

impl ListQuery {
    /// List with client defaults and cleanup on
    pub fn new() -> Self {
        Self::default()
    }

    /// Override both languages for this call
    #[must_use]
    pub fn languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_lang = Some(source.into());
        self.target_lang = Some(target.into());
        self
    }

    /// Enable or disable markup cleanup
    #[must_use]
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }
}

// ============================================================================
// Results
// ============================================================================

/// A usage example: source sentence and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationSample {
    pub source_text: String,
    pub target_text: String,
}

/// Raw sample as returned in a translation page's `list`
#[derive(Debug, Deserialize)]
pub(crate) struct RawSample {
    s_text: String,
    t_text: String,
}

impl TranslationSample {
    pub(crate) fn from_raw(raw: RawSample, cleanup: bool) -> Self {
        Self {
            source_text: cleanup_if(raw.s_text, cleanup),
            target_text: cleanup_if(raw.t_text, cleanup),
        }
    }
}

/// Raw entry of a translation response's `dictionary_entry_list`
#[derive(Debug, Deserialize)]
pub(crate) struct RawDictionaryEntry {
    pub(crate) term: String,
}

/// Raw entry of a suggestion list
#[derive(Debug, Deserialize)]
pub(crate) struct RawSuggestion {
    pub(crate) suggestion: String,
}

/// A context sample saved as favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    pub source_lang: String,
    pub source_text: String,
    pub source_context: String,
    pub target_lang: String,
    pub target_text: String,
    pub target_context: String,
}

/// Raw favorite with the service's field names
#[derive(Debug, Deserialize)]
pub(crate) struct RawFavorite {
    #[serde(rename = "srcLang")]
    src_lang: String,
    #[serde(rename = "srcText")]
    src_text: String,
    #[serde(rename = "srcContext")]
    src_context: String,
    #[serde(rename = "trgLang")]
    trg_lang: String,
    #[serde(rename = "trgText")]
    trg_text: String,
    #[serde(rename = "trgContext")]
    trg_context: String,
}

impl FavoriteEntry {
    /// Only the two context fields carry markup
    pub(crate) fn from_raw(raw: RawFavorite, cleanup: bool) -> Self {
        Self {
            source_lang: raw.src_lang,
            source_text: raw.src_text,
            source_context: cleanup_if(raw.src_context, cleanup),
            target_lang: raw.trg_lang,
            target_text: raw.trg_text,
            target_context: cleanup_if(raw.trg_context, cleanup),
        }
    }
}

/// A past search of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub source_lang: String,
    pub source_text: String,
    pub target_lang: String,
    /// Translations in the order the service numbered them
    pub translations: Vec<String>,
}

/// Raw history entry; translations arrive as `translation1`, `translation2`, ...
#[derive(Debug, Deserialize)]
pub(crate) struct RawHistoryEntry {
    #[serde(rename = "srcLang")]
    src_lang: String,
    #[serde(rename = "srcText")]
    src_text: String,
    #[serde(rename = "trgLang")]
    trg_lang: String,
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

impl From<RawHistoryEntry> for HistoryEntry {
    fn from(raw: RawHistoryEntry) -> Self {
        Self {
            translations: ordered_translations(&raw.rest),
            source_lang: raw.src_lang,
            source_text: raw.src_text,
            target_lang: raw.trg_lang,
        }
    }
}
