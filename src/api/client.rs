//! Reverso Context endpoint client
//!
//! Builds the request payload of each endpoint, drives the pagers and
//! normalizes the entries. All I/O goes through the [`Session`].

use super::types::{
    FavoriteEntry, HistoryEntry, ListQuery, RawDictionaryEntry, RawFavorite, RawHistoryEntry,
    RawSample, RawSuggestion, SearchQuery, TranslationSample,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{Method, RequestConfig, Session};
use crate::normalize::cleanup_if;
use crate::pagination::{paginate, OffsetPaginator, PageNumberPaginator};
use crate::types::{JsonObject, LanguagePair};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

const QUERY_PATH: &str = "bst-query-service";
const SUGGEST_PATH: &str = "bst-suggest-service";
const FAVORITES_PATH: &str = "bst-web-user/user/favourites";
const HISTORY_PATH: &str = "bst-web-user/user/history";

/// Query mode the translation service expects
const QUERY_MODE: u32 = 0;

/// Sort order code for the user list endpoints
const LIST_ORDER: &str = "10";

/// Resolved endpoint URLs
#[derive(Debug, Clone)]
struct Endpoints {
    query: Url,
    suggest: Url,
    favorites: Url,
    history: Url,
}

impl Endpoints {
    fn new(base: &Url) -> Result<Self> {
        Ok(Self {
            query: base.join(QUERY_PATH)?,
            suggest: base.join(SUGGEST_PATH)?,
            favorites: base.join(FAVORITES_PATH)?,
            history: base.join(HISTORY_PATH)?,
        })
    }
}

/// Client for the Reverso Context service
///
/// Languages default to the configured pair and can be overridden per call.
/// Favorites and history need credentials; the client logs in on first use.
pub struct ContextClient {
    session: Session,
    config: ClientConfig,
    endpoints: Endpoints,
}

impl ContextClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let endpoints = Endpoints::new(&config.base_url()?)?;
        let session = Session::new(&config)?;

        Ok(Self {
            session,
            config,
            endpoints,
        })
    }

    /// Get the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Log in with the configured credentials (no-op when already logged in)
    pub async fn login(&self) -> Result<()> {
        self.session.login().await
    }

    /// Translations of a word or phrase, without context
    ///
    /// Only the first result page is read; `target_text` is ignored.
    pub async fn get_translations(&self, query: &SearchQuery) -> Result<Vec<String>> {
        let mut body = self.translation_body(query, None);
        body.insert("npage".to_string(), Value::from(1));

        let mut contents = self
            .session
            .json_request(
                Method::POST,
                self.endpoints.query.as_str(),
                RequestConfig::new().json(Value::Object(body)),
            )
            .await?;

        let entries: Vec<RawDictionaryEntry> = take_entries(&mut contents, "dictionary_entry_list")?;
        debug!("Got {} translations for '{}'", entries.len(), query.text);
        Ok(entries.into_iter().map(|entry| entry.term).collect())
    }

    /// Usage examples of a text with their translations, across all pages
    pub fn get_translation_samples(
        &self,
        query: &SearchQuery,
    ) -> impl Stream<Item = Result<TranslationSample>> + '_ {
        let body = self.translation_body(query, query.target_text.as_deref());
        let cleanup = query.cleanup;
        let session = &self.session;
        let url = self.endpoints.query.clone();

        let pages = paginate(PageNumberPaginator::translation_samples(), move |params| {
            let mut body = body.clone();
            body.extend(params);
            let request = RequestConfig::new().json(Value::Object(body));
            let url = url.clone();
            async move { session.json_request(Method::POST, url.as_str(), request).await }
        });

        flatten_pages(pages, move |mut page| {
            let samples: Vec<RawSample> = take_entries(&mut page, "list")?;
            Ok(samples
                .into_iter()
                .map(|raw| TranslationSample::from_raw(raw, cleanup))
                .collect())
        })
    }

    /// Completions of a partial search text
    ///
    /// With `fuzzy` set, typo-tolerant matches follow the exact ones.
    pub async fn get_search_suggestions(&self, query: &SearchQuery) -> Result<Vec<String>> {
        let languages = self.languages(query.source_lang.as_deref(), query.target_lang.as_deref());
        let body = json!({
            "search": query.text,
            "source_lang": languages.source,
            "target_lang": languages.target,
        });

        let mut contents = self
            .session
            .json_request(
                Method::POST,
                self.endpoints.suggest.as_str(),
                RequestConfig::new().json(body),
            )
            .await?;

        let mut parts = vec!["suggestions"];
        if query.fuzzy {
            parts.extend(["fuzzy1", "fuzzy2"]);
        }

        let mut suggestions = Vec::new();
        for part in parts {
            let terms: Vec<RawSuggestion> = take_entries(&mut contents, part)?;
            suggestions.extend(
                terms
                    .into_iter()
                    .map(|term| cleanup_if(term.suggestion, query.cleanup)),
            );
        }
        Ok(suggestions)
    }

    /// Context samples the user saved as favorites
    pub fn get_favorites(
        &self,
        query: &ListQuery,
    ) -> impl Stream<Item = Result<FavoriteEntry>> + '_ {
        let cleanup = query.cleanup;
        let pages = self.user_list_pages(
            self.endpoints.favorites.clone(),
            query,
            self.config.favorites_page_size,
        );

        flatten_pages(pages, move |mut page| {
            let favorites: Vec<RawFavorite> = take_entries(&mut page, "results")?;
            Ok(favorites
                .into_iter()
                .map(|raw| FavoriteEntry::from_raw(raw, cleanup))
                .collect())
        })
    }

    /// The user's search history
    pub fn get_history(&self, query: &ListQuery) -> impl Stream<Item = Result<HistoryEntry>> + '_ {
        let pages = self.user_list_pages(
            self.endpoints.history.clone(),
            query,
            self.config.history_page_size,
        );

        flatten_pages(pages, |mut page| {
            let entries: Vec<RawHistoryEntry> = take_entries(&mut page, "results")?;
            Ok(entries.into_iter().map(HistoryEntry::from).collect())
        })
    }

    /// Pages of a per-user list, logging in once before the first request
    fn user_list_pages(
        &self,
        url: Url,
        query: &ListQuery,
        page_size: u32,
    ) -> impl Stream<Item = Result<Value>> + '_ {
        let languages = self.languages(query.source_lang.as_deref(), query.target_lang.as_deref());
        let session = &self.session;

        stream::once(session.login())
            .map_ok(move |()| {
                let url = url.clone();
                let languages = languages.clone();
                paginate(OffsetPaginator::user_list(page_size), move |params| {
                    let request = RequestConfig::new()
                        .query("sourceLang", &languages.source)
                        .query("targetLang", &languages.target)
                        .query("order", LIST_ORDER)
                        .query_object(params);
                    let url = url.clone();
                    async move { session.json_request(Method::GET, url.as_str(), request).await }
                })
            })
            .try_flatten()
    }

    /// Request body of the translation query service, without page number
    fn translation_body(&self, query: &SearchQuery, target_text: Option<&str>) -> JsonObject {
        let languages = self.languages(query.source_lang.as_deref(), query.target_lang.as_deref());
        let mut body = JsonObject::new();
        body.insert("source_lang".to_string(), Value::from(languages.source));
        body.insert("target_lang".to_string(), Value::from(languages.target));
        body.insert("mode".to_string(), Value::from(QUERY_MODE));
        body.insert("source_text".to_string(), Value::from(query.text.as_str()));
        body.insert(
            "target_text".to_string(),
            Value::from(target_text.unwrap_or_default()),
        );
        body
    }

    /// Per-call languages, falling back to the configured defaults
    fn languages(&self, source: Option<&str>, target: Option<&str>) -> LanguagePair {
        LanguagePair::new(
            source
                .filter(|s| !s.is_empty())
                .unwrap_or(&self.config.source_lang),
            target
                .filter(|s| !s.is_empty())
                .unwrap_or(&self.config.target_lang),
        )
    }
}

/// Move the entry list stored under `key` out of a response object
fn take_entries<T: DeserializeOwned>(contents: &mut Value, key: &str) -> Result<Vec<T>> {
    let entries = contents
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| Error::decode(format!("response has no '{key}' list")))?;
    Ok(serde_json::from_value(entries)?)
}

/// Turn a stream of pages into a stream of their entries
fn flatten_pages<'a, S, T, F>(pages: S, mut extract: F) -> impl Stream<Item = Result<T>> + 'a
where
    S: Stream<Item = Result<Value>> + 'a,
    T: 'a,
    F: FnMut(Value) -> Result<Vec<T>> + 'a,
{
    pages
        .map(move |page| page.and_then(&mut extract))
        .map_ok(|entries| stream::iter(entries.into_iter().map(Ok::<T, Error>)))
        .try_flatten()
}
