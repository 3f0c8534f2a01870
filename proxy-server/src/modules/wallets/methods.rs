use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::config::ServerContext;
use crate::errors::ProxyError;
use crate::modules::require_address;

/// Fetches the token balances of a wallet, wrapped as `{"data": <balances>}`
#[get("/getBalance/{wallet}")]
pub async fn get_balance(
    data: web::Data<ServerContext>,
    wallet: web::Path<String>,
) -> Result<HttpResponse, ProxyError> {
    let wallet = require_address(&wallet)?;
    tracing::debug!(target: crate::PROXY_SERVER, "`get_balance` call. Wallet: {}", wallet);

    let chain_id = data.chain_id.to_string();
    let balances = data
        .upstream_client
        .get_json(
            &["balance", "v1.2", chain_id.as_str(), "balances", wallet],
            &[],
            "get_balance",
        )
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": balances })))
}

#[derive(Deserialize, Debug)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

/// Fetches the latest transaction history events of a wallet
#[get("/api/{address}/history")]
pub async fn history(
    data: web::Data<ServerContext>,
    address: web::Path<String>,
    web::Query(params): web::Query<HistoryParams>,
) -> Result<HttpResponse, ProxyError> {
    let address = require_address(&address)?;
    tracing::debug!(
        target: crate::PROXY_SERVER,
        "`history` call. Address: {}, params: {:?}",
        address,
        params
    );

    let limit = params.limit.unwrap_or(super::DEFAULT_HISTORY_LIMIT);
    let events = data
        .upstream_client
        .get_json(
            &["history", "v2.0", "history", address, "events"],
            &[
                ("chainId", data.chain_id.to_string()),
                ("limit", limit.to_string()),
            ],
            "history",
        )
        .await?;
    Ok(HttpResponse::Ok().json(events))
}
