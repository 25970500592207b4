//! The page iteration loop shared by all strategies

use super::types::Paginator;
use crate::error::{Error, Result};
use crate::types::JsonObject;
use futures::stream::{self, Stream};
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Lazily fetch pages until the paginator reports the boundary
///
/// `fetch` receives the paginator's parameters for each page and performs
/// the request. Pages are requested one at a time, only when the stream
/// is polled, and the first request is unconditional. The stream ends
/// after the first error.
///
/// Every call starts a fresh sequence; there is no resume.
pub fn paginate<'a, P, F, Fut>(paginator: P, fetch: F) -> impl Stream<Item = Result<Value>> + 'a
where
    P: Paginator + 'a,
    F: FnMut(JsonObject) -> Fut + 'a,
    Fut: Future<Output = Result<Value>> + 'a,
{
    let state = paginator.initial_state();

    stream::try_unfold(Some((paginator, fetch, state)), |cursor| async move {
        let Some((paginator, mut fetch, mut state)) = cursor else {
            return Ok(None);
        };

        let params = paginator.params(&state);
        debug!("Fetching page {} with {:?}", state.pages_fetched + 1, params);
        let page = fetch(params).await?;

        let next = if paginator.process_response(&page, &mut state)?.is_done() {
            debug!(
                "Pagination done after {} page(s), total {:?}",
                state.pages_fetched, state.total
            );
            None
        } else {
            Some((paginator, fetch, state))
        };

        Ok::<_, Error>(Some((page, next)))
    })
}
