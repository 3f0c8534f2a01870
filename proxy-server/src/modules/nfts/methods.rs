use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::config::ServerContext;
use crate::errors::ProxyError;
use crate::modules::require_address;

#[derive(Deserialize, Debug)]
pub struct FetchNftsParams {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
    #[serde(rename = "chainIds")]
    pub chain_ids: Option<String>,
    #[serde(rename = "openseaNextToken")]
    pub opensea_next_token: Option<String>,
}

/// Fetches one page of the NFTs owned by an address.
/// The upstream body (`{"assets": [...], "openseaNextToken": ...}`) is returned untouched.
#[get("/api/fetchNfts/{address}")]
pub async fn fetch_nfts(
    data: web::Data<ServerContext>,
    address: web::Path<String>,
    web::Query(params): web::Query<FetchNftsParams>,
) -> Result<HttpResponse, ProxyError> {
    let address = require_address(&address)?;
    tracing::debug!(
        target: crate::PROXY_SERVER,
        "`fetch_nfts` call. Address: {}, params: {:?}",
        address,
        params
    );

    let limit = params.limit.unwrap_or(super::DEFAULT_NFT_PAGE_SIZE);
    if limit == 0 {
        return Err(ProxyError::invalid_request("`limit` must be greater than zero"));
    }
    let chain_ids = params
        .chain_ids
        .filter(|chain_ids| !chain_ids.trim().is_empty())
        .unwrap_or_else(|| data.chain_id.to_string());

    let mut query = vec![
        ("chainIds", chain_ids),
        ("address", address.to_string()),
        ("limit", limit.to_string()),
        ("offset", params.offset.unwrap_or_default().to_string()),
    ];
    if let Some(token) = params.opensea_next_token.filter(|token| !token.is_empty()) {
        query.push(("openseaNextToken", token));
    }

    let nfts = data
        .upstream_client
        .get_json(&["nft", "v2", "byaddress"], &query, "fetch_nfts")
        .await?;
    Ok(HttpResponse::Ok().json(nfts))
}
