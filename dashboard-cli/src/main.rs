use clap::Parser;

use crate::config::{Command, Opts};

mod balances;
mod config;
mod nfts;
mod prices;
mod proxy_client;

pub(crate) const DASHBOARD: &str = "dashboard";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    configuration::init_tracing(DASHBOARD).await?;
    let opts: Opts = Opts::parse();
    let dashboard_config =
        configuration::read_configuration::<configuration::DashboardConfig>().await?;

    let proxy_url = opts
        .proxy_url
        .unwrap_or_else(|| dashboard_config.general.proxy_url.clone());
    let client = reqwest::Client::new();

    match opts.command {
        Command::Nfts {
            address,
            chain,
            page_size,
            pages,
            all,
        } => {
            let max_pages = if all { None } else { Some(pages) };
            nfts::run(
                &proxy_url,
                client,
                &address,
                chain.unwrap_or(dashboard_config.general.chain_id),
                page_size.unwrap_or(dashboard_config.general.page_size),
                max_pages,
            )
            .await
        }
        Command::Balances { address } => {
            let proxy = proxy_client::ProxyClient::new(proxy_url, client);
            balances::run(&proxy, &address).await
        }
        Command::Prices { token, period } => {
            let proxy = proxy_client::ProxyClient::new(proxy_url, client);
            prices::run(&proxy, &token, &period).await
        }
    }
}
