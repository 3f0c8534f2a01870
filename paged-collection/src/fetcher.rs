use std::sync::{Mutex, MutexGuard, PoisonError};

use dashboard_primitives::{Filter, PageRequest};

use crate::errors::InvalidInput;
use crate::source::PageSource;
use crate::state::{AggregateState, ErrorInfo};
use crate::PAGER;

fn lock_state(state: &Mutex<AggregateState>) -> MutexGuard<'_, AggregateState> {
    // The state is only mutated in short non-panicking sections, a poisoned lock still holds consistent data
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the fetch of one generation as in flight.
/// Dropping it without `finish` (the fetch future was cancelled) releases the guard.
struct InFlight<'a> {
    state: &'a Mutex<AggregateState>,
    generation: u64,
    armed: bool,
}

impl InFlight<'_> {
    fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock_state(self.state);
        if state.generation == self.generation {
            state.is_fetching = false;
        }
    }
}

/// Turns repeated bounded page fetches into a single "load more" operation.
///
/// The fetcher owns the aggregate state of one query at a time. It can be shared
/// behind an `Arc`; concurrent `fetch_next` calls do not queue up, all but the
/// first one return the current snapshot unchanged while a fetch is in flight.
pub struct PagedCollectionFetcher<S> {
    source: S,
    state: Mutex<AggregateState>,
}

impl<S> PagedCollectionFetcher<S>
where
    S: PageSource + Send + Sync,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(AggregateState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts a new query. Any fetch still in flight for the previous query
    /// becomes stale and its result is dropped when it arrives.
    pub fn reset(&self, resource_key: &str, filter: Filter) -> Result<AggregateState, InvalidInput> {
        let resource_key = resource_key.trim();
        if resource_key.is_empty() {
            return Err(InvalidInput::BlankResourceKey);
        }
        let mut state = lock_state(&self.state);
        let generation = state.generation.wrapping_add(1);
        tracing::debug!(
            target: PAGER,
            "Reset query to `{}` {:?} (generation {})",
            resource_key,
            filter,
            generation
        );
        *state = AggregateState::new(resource_key.to_string(), filter, generation);
        Ok(state.clone())
    }

    /// Requests the page following the last successful one and merges it into the aggregate.
    ///
    /// Upstream failures do not surface as `Err`: they land in `last_error` of the
    /// returned snapshot and the accumulated items stay as they were.
    pub async fn fetch_next(&self, page_size: usize) -> Result<AggregateState, InvalidInput> {
        let (request, generation) = {
            let mut state = lock_state(&self.state);
            if page_size == 0 {
                return Err(InvalidInput::ZeroPageSize);
            }
            if !state.has_query() {
                return Err(InvalidInput::NoQuery);
            }
            if let Some(locked) = state.page_size {
                if locked != page_size {
                    return Err(InvalidInput::PageSizeChanged {
                        locked,
                        requested: page_size,
                    });
                }
            }
            if state.is_fetching || !state.has_more {
                return Ok(state.clone());
            }
            state.is_fetching = true;
            state.page_size = Some(page_size);
            let request = PageRequest::new(
                state.resource_key.clone(),
                page_size,
                state.last_page_offset,
                state.filter.clone(),
            );
            (request, state.generation)
        };

        let in_flight = InFlight {
            state: &self.state,
            generation,
            armed: true,
        };

        tracing::debug!(
            target: PAGER,
            "Fetching `{}` offset {} limit {}",
            request.resource_key,
            request.page_offset,
            request.page_size
        );
        let result = self.source.fetch_page(&request).await;

        let mut state = lock_state(&self.state);
        in_flight.finish();
        if state.generation != generation {
            tracing::debug!(
                target: PAGER,
                "Dropping stale page for `{}` offset {} (generation {}, current {})",
                request.resource_key,
                request.page_offset,
                generation,
                state.generation
            );
            return Ok(state.clone());
        }

        match result {
            Ok(page) => {
                let item_count = page.item_count();
                state.has_more = item_count == page_size;
                state.last_page_offset += page_size as u64;
                state.accumulated_items.extend(page.items);
                state.continuation_token = page.continuation_token;
                state.last_error = None;
                tracing::debug!(
                    target: PAGER,
                    "Got {} items for `{}`, {} in total, has more: {}",
                    item_count,
                    request.resource_key,
                    state.item_count(),
                    state.has_more
                );
            }
            Err(err) => {
                tracing::warn!(
                    target: PAGER,
                    "Failed to fetch `{}` offset {}: {}",
                    request.resource_key,
                    request.page_offset,
                    err
                );
                state.last_error = Some(ErrorInfo::from_fetch_error(&err, request.page_offset));
            }
        }
        state.is_fetching = false;
        Ok(state.clone())
    }

    /// Snapshot for rendering
    pub fn current_state(&self) -> AggregateState {
        lock_state(&self.state).clone()
    }
}
