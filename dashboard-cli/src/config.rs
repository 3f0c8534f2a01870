use clap::{Parser, Subcommand};

/// Wallet dashboard
/// Browses NFTs, token balances and price history through the proxy server
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
pub struct Opts {
    /// Proxy server url, overrides `general.dashboard.proxy_url`
    #[clap(long, env)]
    pub proxy_url: Option<url::Url>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Lists the NFTs owned by an address, one page at a time
    Nfts {
        address: String,
        /// Chain to list, defaults to `general.chain_id`
        #[clap(long)]
        chain: Option<u64>,
        /// Defaults to `general.dashboard.page_size`
        #[clap(long)]
        page_size: Option<usize>,
        /// How many pages to load
        #[clap(
            long,
            default_value = "1",
            conflicts_with = "all",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        pages: u64,
        /// Keep loading until the listing is exhausted
        #[clap(long)]
        all: bool,
    },
    /// Prints the ERC-20 balances of a wallet
    Balances { address: String },
    /// Prints the price history of a token
    Prices {
        token: String,
        /// One of 1d, 7d, 30d, 1y, all
        #[clap(long, default_value = "7d")]
        period: String,
    },
}

/// Rejects blank addresses before any request goes out.
pub(crate) fn require_address(address: &str) -> anyhow::Result<&str> {
    let address = address.trim();
    if address.is_empty() {
        anyhow::bail!("Please enter a wallet address");
    }
    Ok(address)
}
