use actix_web::{get, web, HttpResponse};

use crate::config::ServerContext;
use crate::errors::ProxyError;

#[get("/api/gas-price")]
pub async fn gas_price(data: web::Data<ServerContext>) -> Result<HttpResponse, ProxyError> {
    let chain_id = data.chain_id.to_string();
    let gas_price = data
        .upstream_client
        .get_json(&["gas-price", "v1.4", chain_id.as_str()], &[], "gas_price")
        .await?;
    Ok(HttpResponse::Ok().json(gas_price))
}
