use dashboard_primitives::formatting::{chain_name, shorten_address};
use paged_collection::{
    AggregateState, Filter, HttpPageSource, InvalidInput, PageSource, PagedCollectionFetcher,
};

/// Page source for the proxy `fetchNfts` route
pub(crate) fn nft_source(
    proxy_url: &url::Url,
    client: reqwest::Client,
) -> anyhow::Result<HttpPageSource> {
    let endpoint = format!(
        "{}/api/fetchNfts/{{key}}",
        proxy_url.as_str().trim_end_matches('/')
    );
    Ok(HttpPageSource::new(&endpoint, client)?
        .items_field("assets")
        .continuation_field("openseaNextToken"))
}

/// Presses "load more" until the listing is exhausted, a page fails,
/// or `max_pages` fetches have been made. `None` means no page limit.
pub(crate) async fn load_pages<S>(
    fetcher: &PagedCollectionFetcher<S>,
    page_size: usize,
    max_pages: Option<u64>,
) -> Result<AggregateState, InvalidInput>
where
    S: PageSource + Send + Sync,
{
    let mut state = fetcher.current_state();
    let mut fetched_pages: u64 = 0;
    while state.has_more && max_pages.map_or(true, |max_pages| fetched_pages < max_pages) {
        state = fetcher.fetch_next(page_size).await?;
        fetched_pages += 1;
        if state.last_error.is_some() {
            break;
        }
    }
    Ok(state)
}

/// One line per asset: name (or token id), contract and chain.
pub(crate) fn describe_asset(asset: &serde_json::Value) -> String {
    let token_id = match asset.get("token_id") {
        Some(serde_json::Value::String(token_id)) => token_id.clone(),
        Some(serde_json::Value::Number(token_id)) => token_id.to_string(),
        _ => "?".to_string(),
    };
    let name = asset
        .get("name")
        .and_then(|name| name.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Token #{}", token_id));
    let contract = asset
        .pointer("/asset_contract/address")
        .and_then(|address| address.as_str())
        .map(shorten_address)
        .unwrap_or_default();
    let chain = match asset.get("chainId") {
        Some(serde_json::Value::Number(chain_id)) => chain_id.as_u64(),
        Some(serde_json::Value::String(chain_id)) => chain_id.parse().ok(),
        _ => None,
    };

    let mut line = name;
    if !contract.is_empty() {
        line.push_str(&format!("  {}", contract));
    }
    if let Some(chain_id) = chain {
        line.push_str(&format!("  [{}]", chain_name(chain_id)));
    }
    line
}

pub(crate) fn summary_line(state: &AggregateState) -> String {
    let mut summary = format!(
        "Found {} NFTs for {}",
        state.item_count(),
        shorten_address(&state.resource_key)
    );
    if state.has_more {
        summary.push_str(" (more available)");
    }
    summary
}

pub(crate) async fn run(
    proxy_url: &url::Url,
    client: reqwest::Client,
    address: &str,
    chain_id: u64,
    page_size: usize,
    max_pages: Option<u64>,
) -> anyhow::Result<()> {
    let address = crate::config::require_address(address)?;
    let fetcher = PagedCollectionFetcher::new(nft_source(proxy_url, client)?);
    let filter = Filter::from([("chainIds".to_string(), chain_id.to_string())]);
    fetcher.reset(address, filter)?;

    tracing::info!(
        target: crate::DASHBOARD,
        "Loading NFTs of {} on {}",
        address,
        chain_name(chain_id)
    );
    let state = load_pages(&fetcher, page_size, max_pages).await?;

    for asset in &state.accumulated_items {
        println!("{}", describe_asset(asset));
    }
    println!("{}", summary_line(&state));
    if let Some(error) = &state.last_error {
        println!(
            "Failed to load more at offset {}: {}",
            error.offset, error.message
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use paged_collection::{PageFetchError, PageRequest, PageResult};

    use super::*;

    /// Serves `total` assets, failing once at `fail_at_call` if set.
    struct Listing {
        total: u64,
        fail_at_call: Option<usize>,
        calls: AtomicUsize,
    }

    impl Listing {
        fn new(total: u64, fail_at_call: Option<usize>) -> Self {
            Self {
                total,
                fail_at_call,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl PageSource for Listing {
        async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, PageFetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if Some(call) == self.fail_at_call {
                return Err(PageFetchError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            let end = (request.page_offset + request.page_size as u64).min(self.total);
            let items = (request.page_offset.min(end)..end)
                .map(|token_id| serde_json::json!({ "token_id": token_id.to_string() }))
                .collect();
            Ok(PageResult::new(items, None))
        }
    }

    #[tokio::test]
    async fn page_budget_is_respected() {
        let fetcher = PagedCollectionFetcher::new(Listing::new(29, None));
        fetcher.reset("0xabc", Filter::new()).unwrap();
        let state = load_pages(&fetcher, 12, Some(2)).await.unwrap();
        assert_eq!(state.item_count(), 24);
        assert!(state.has_more);
    }

    #[tokio::test]
    async fn all_pages_until_short_page() {
        let fetcher = PagedCollectionFetcher::new(Listing::new(29, None));
        fetcher.reset("0xabc", Filter::new()).unwrap();
        let state = load_pages(&fetcher, 12, None).await.unwrap();
        assert_eq!(state.item_count(), 29);
        assert!(!state.has_more);
        assert_eq!(fetcher.source().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failure_stops_loading_and_keeps_items() {
        let fetcher = PagedCollectionFetcher::new(Listing::new(29, Some(1)));
        fetcher.reset("0xabc", Filter::new()).unwrap();
        let state = load_pages(&fetcher, 12, None).await.unwrap();
        assert_eq!(state.item_count(), 12);
        assert_eq!(state.last_page_offset, 12);
        assert_eq!(state.last_error.as_ref().map(|error| error.status), Some(Some(500)));

        let state = load_pages(&fetcher, 12, None).await.unwrap();
        assert_eq!(state.item_count(), 29);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn endpoint_has_key_placeholder() {
        let proxy_url = url::Url::parse("http://localhost:4000").unwrap();
        assert!(nft_source(&proxy_url, reqwest::Client::new()).is_ok());
    }

    #[test]
    fn asset_lines() {
        let asset = serde_json::json!({
            "token_id": "42",
            "name": "",
            "chainId": 137,
            "asset_contract": { "address": "0x1234567890abcdef1234567890abcdef12345678" }
        });
        assert_eq!(describe_asset(&asset), "Token #42  0x1234...5678  [Polygon]");

        let asset = serde_json::json!({ "token_id": 7, "name": "Punk", "chainId": "1" });
        assert_eq!(describe_asset(&asset), "Punk  [Ethereum]");
    }

    #[tokio::test]
    async fn summary() {
        let fetcher = PagedCollectionFetcher::new(Listing::new(5, None));
        fetcher
            .reset("0x1234567890abcdef1234567890abcdef1234abcd", Filter::new())
            .unwrap();
        let state = load_pages(&fetcher, 12, Some(1)).await.unwrap();
        assert_eq!(summary_line(&state), "Found 5 NFTs for 0x1234...abcd");

        let fetcher = PagedCollectionFetcher::new(Listing::new(29, None));
        fetcher
            .reset("0x1234567890abcdef1234567890abcdef1234abcd", Filter::new())
            .unwrap();
        let state = load_pages(&fetcher, 12, Some(1)).await.unwrap();
        assert_eq!(
            summary_line(&state),
            "Found 12 NFTs for 0x1234...abcd (more available)"
        );
    }
}
