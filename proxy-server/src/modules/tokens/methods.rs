use actix_web::{get, web, HttpResponse};

use crate::config::ServerContext;
use crate::errors::ProxyError;
use crate::modules::require_address;

/// Price series of a token over the given period as `[{"t": <unix secs>, "v": <price>}]`.
/// Prices are quoted in the configured quote token.
#[get("/api/{token}/prices/{period}")]
pub async fn token_prices(
    data: web::Data<ServerContext>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ProxyError> {
    let (token, period) = path.into_inner();
    let token = require_address(&token)?;
    let chart_period = super::chart_period(&period).ok_or_else(|| {
        ProxyError::InvalidRequest(format!("Unsupported price period `{}`", period))
    })?;
    tracing::debug!(
        target: crate::PROXY_SERVER,
        "`token_prices` call. Token: {}, period: {}",
        token,
        chart_period
    );

    let chain_id = data.chain_id.to_string();
    let chart = data
        .upstream_client
        .get_json(
            &[
                "charts",
                "v1.0",
                "chart",
                "line",
                token,
                data.quote_token.as_str(),
                chart_period,
                chain_id.as_str(),
            ],
            &[],
            "token_prices",
        )
        .await?;
    let points = super::price_points(&chart)?;
    Ok(HttpResponse::Ok().json(points))
}
