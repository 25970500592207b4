//! Pagination strategy implementations
//!
//! Reverso uses two schemes: numbered pages for translation samples and
//! offset/length windows for the per-user lists.

use super::types::{extract_total, NextPage, PaginationState, Paginator};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::Result;
use crate::types::JsonObject;
use serde_json::Value;

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Requests pages `start_page..=total_pages`, one request per page. The
/// total is re-read from every response.
/// Pattern: `{"npage": 2}` -> `{"list": [...], "npages": 5}`
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Request parameter name for page number
    pub page_param: String,
    /// First page number
    pub start_page: u32,
    /// Path to the total page count in the response
    pub total_pages_path: String,
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(
        page_param: impl Into<String>,
        start_page: u32,
        total_pages_path: impl Into<String>,
    ) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            total_pages_path: total_pages_path.into(),
        }
    }

    /// Paginator for the translation query service
    pub fn translation_samples() -> Self {
        Self::new("npage", 1, "npages")
    }
}

impl Paginator for PageNumberPaginator {
    fn initial_state(&self) -> PaginationState {
        PaginationState::with_page(self.start_page)
    }

    fn params(&self, state: &PaginationState) -> JsonObject {
        let mut params = JsonObject::new();
        params.insert(self.page_param.clone(), Value::from(state.page));
        params
    }

    fn process_response(&self, body: &Value, state: &mut PaginationState) -> Result<NextPage> {
        let total_pages = extract_total(body, &self.total_pages_path)?;
        state.record_page(total_pages);

        // `>=` rather than `==`: a report of 0 pages must not loop forever
        if u64::from(state.page) >= total_pages {
            return Ok(NextPage::Done);
        }

        state.next_page();
        Ok(NextPage::Continue)
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// Uses offset and limit parameters with a fixed limit; stops once the
/// offset reaches the total result count.
/// Pattern: `?start=50&length=50` -> `{"results": [...], "numTotalResults": 120}`
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Request parameter name for offset
    pub offset_param: String,
    /// Request parameter name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit_value: u32,
    /// Path to the total result count in the response
    pub total_path: String,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit_value: u32,
        total_path: impl Into<String>,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit_value,
            total_path: total_path.into(),
        }
    }

    /// Paginator for the favorites and history endpoints
    pub fn user_list(page_size: u32) -> Self {
        Self::new("start", "length", page_size, "numTotalResults")
    }
}

impl Default for OffsetPaginator {
    fn default() -> Self {
        Self::user_list(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator for OffsetPaginator {
    fn initial_state(&self) -> PaginationState {
        PaginationState::new()
    }

    fn params(&self, state: &PaginationState) -> JsonObject {
        let mut params = JsonObject::new();
        params.insert(self.offset_param.clone(), Value::from(state.offset));
        params.insert(self.limit_param.clone(), Value::from(self.limit_value));
        params
    }

    fn process_response(&self, body: &Value, state: &mut PaginationState) -> Result<NextPage> {
        let total = extract_total(body, &self.total_path)?;
        state.record_page(total);

        state.add_offset(u64::from(self.limit_value));
        if state.offset >= total {
            return Ok(NextPage::Done);
        }

        Ok(NextPage::Continue)
    }
}
