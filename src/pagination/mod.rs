//! Pagination module
//!
//! Supports: Page Number, Offset
//!
//! # Overview
//!
//! Each strategy implements [`Paginator`]: it produces the request
//! parameters for the current state and decides from each response whether
//! another page exists. [`paginate`] drives any strategy as a lazy stream
//! of pages.

mod pager;
mod strategies;
mod types;

pub use pager::paginate;
pub use strategies::{OffsetPaginator, PageNumberPaginator};
pub use types::{extract_path, extract_total, NextPage, PaginationState, Paginator};
