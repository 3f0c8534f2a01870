use dashboard_primitives::{Filter, Item};
use serde::Serialize;

use crate::errors::PageFetchError;

/// Last failed page request, kept for display until the next successful fetch.
#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct ErrorInfo {
    pub message: String,
    /// Offset of the request that failed. A retry asks for the same offset.
    pub offset: u64,
    /// Upstream HTTP status, when the provider answered at all
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub(crate) fn from_fetch_error(err: &PageFetchError, offset: u64) -> Self {
        Self {
            message: err.to_string(),
            offset,
            status: err.status(),
        }
    }
}

/// Everything retrieved so far for one query, as seen by the caller.
#[derive(Serialize, PartialEq, Debug, Clone, Default)]
pub struct AggregateState {
    pub resource_key: String,
    pub filter: Filter,
    /// Locked by the first fetch after a reset
    pub page_size: Option<usize>,
    /// Items in fetch order, never deduplicated
    pub accumulated_items: Vec<Item>,
    /// Offset the next fetch will request
    pub last_page_offset: u64,
    pub has_more: bool,
    pub is_fetching: bool,
    pub last_error: Option<ErrorInfo>,
    pub continuation_token: Option<String>,
    /// Bumped on every reset, responses from older generations are dropped
    pub generation: u64,
}

impl AggregateState {
    pub(crate) fn new(resource_key: String, filter: Filter, generation: u64) -> Self {
        Self {
            resource_key,
            filter,
            page_size: None,
            accumulated_items: vec![],
            last_page_offset: 0,
            has_more: true,
            is_fetching: false,
            last_error: None,
            continuation_token: None,
            generation,
        }
    }

    pub fn item_count(&self) -> usize {
        self.accumulated_items.len()
    }

    pub fn has_query(&self) -> bool {
        !self.resource_key.is_empty()
    }
}
