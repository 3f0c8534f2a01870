use actix_web::web;
use config::ServerContext;

#[macro_use]
extern crate lazy_static;

mod config;
mod errors;
mod health;
mod metrics;
mod middlewares;
mod modules;
mod upstream;

pub(crate) const PROXY_SERVER: &str = "proxy_server";

/// Registers every route of the proxy
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root)
        .service(health::get_health_status)
        .service(metrics::get_metrics)
        .service(modules::wallets::methods::get_balance)
        .service(modules::wallets::methods::history)
        .service(modules::network::methods::gas_price)
        .service(modules::nfts::methods::fetch_nfts)
        .service(modules::tokens::methods::token_prices);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    configuration::init_tracing(PROXY_SERVER).await?;
    let proxy_config =
        configuration::read_configuration::<configuration::ProxyServerConfig>().await?;

    let server_port = proxy_config.general.server_port;
    let server_context = web::Data::new(ServerContext::init(&proxy_config)?);

    tracing::info!(
        target: PROXY_SERVER,
        "Starting proxy server on http://0.0.0.0:{} (upstream {}, chain {})",
        server_port,
        proxy_config.upstream.api_url,
        proxy_config.general.chain_id
    );

    actix_web::HttpServer::new(move || {
        let cors = actix_cors::Cors::permissive();
        actix_web::App::new()
            .app_data(server_context.clone())
            .wrap(cors)
            .wrap(middlewares::RequestsCounters)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes)
    })
    .bind(("0.0.0.0", server_port))?
    .run()
    .await?;

    Ok(())
}
