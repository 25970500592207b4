//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde_json::Value;

/// Result of processing a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request another page with the updated state
    Continue,
    /// The boundary was reached, no further request
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Current page number (for page-based pagination)
    pub page: u32,
    /// Current offset (for offset-based pagination)
    pub offset: u64,
    /// Total reported by the last response (pages or results)
    pub total: Option<u64>,
    /// Pages fetched so far
    pub pages_fetched: u32,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u64) {
        self.offset += amount;
    }

    /// Record a fetched page and the total it reported
    pub fn record_page(&mut self, total: u64) {
        self.pages_fetched += 1;
        self.total = Some(total);
    }
}

/// Core trait for pagination strategies
///
/// A strategy decides what to send for the current state and, from each
/// response, whether another request is needed. The loop itself lives in
/// [`paginate`](super::paginate).
pub trait Paginator: Send + Sync {
    /// State before the first request
    fn initial_state(&self) -> PaginationState;

    /// Request parameters for the page described by `state`
    fn params(&self, state: &PaginationState) -> JsonObject;

    /// Read the total from a response and advance the state
    fn process_response(&self, body: &Value, state: &mut PaginationState) -> Result<NextPage>;
}

/// Extract a JSON value from a path like `$.meta.total` or `total`
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Read a non-negative integer total from a response
pub fn extract_total(body: &Value, path: &str) -> Result<u64> {
    extract_path(body, path)
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::decode(format!("response has no integer '{path}' field")))
}
