use dashboard_primitives::{PageRequest, PageResult};

use crate::errors::PageFetchError;

/// A paged upstream resource addressed by offset and limit.
#[async_trait::async_trait]
pub trait PageSource {
    /// Fetches exactly one page. Implementations must not retry on their own,
    /// the caller decides whether to repeat the same offset.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, PageFetchError>;
}

#[async_trait::async_trait]
impl<T> PageSource for std::sync::Arc<T>
where
    T: PageSource + Send + Sync + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, PageFetchError> {
        self.as_ref().fetch_page(request).await
    }
}
