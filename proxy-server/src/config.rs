use crate::upstream::UpstreamClient;

pub struct ServerContext {
    pub upstream_client: UpstreamClient,
    /// Chain the balance, history, gas and price endpoints are queried on
    pub chain_id: u64,
    /// Token price charts are quoted in
    pub quote_token: String,
}

impl ServerContext {
    pub fn init(config: &configuration::ProxyServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            upstream_client: UpstreamClient::new(&config.upstream)?,
            chain_id: config.general.chain_id,
            quote_token: config.upstream.quote_token.clone(),
        })
    }
}
