//! Incremental "load more" listing over offset/limit paged upstream APIs.
//!
//! [`PagedCollectionFetcher`] keeps everything fetched so far for one query and infers
//! exhaustion from short pages, since the providers expose neither a total count nor a
//! reliable cursor. [`HttpPageSource`] is the JSON-over-HTTP transport used in production.

mod errors;
mod fetcher;
mod http_source;
mod source;
mod state;

pub use dashboard_primitives::{Filter, Item, PageRequest, PageResult};
pub use errors::{InvalidInput, PageFetchError};
pub use fetcher::PagedCollectionFetcher;
pub use http_source::HttpPageSource;
pub use source::PageSource;
pub use state::{AggregateState, ErrorInfo};

pub(crate) const PAGER: &str = "paged_collection";
