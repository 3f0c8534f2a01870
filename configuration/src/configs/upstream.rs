use serde_derive::Deserialize;

use crate::configs::{deserialize_optional_data_or_env, required_value};

/// Connection settings of the third-party data provider the proxy forwards to.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_url: url::Url,
    pub api_key: String,
    pub request_timeout: std::time::Duration,
    /// Token the price charts are quoted in
    pub quote_token: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommonUpstreamConfig {
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub api_url: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub api_key: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub quote_token: Option<String>,
}

impl CommonUpstreamConfig {
    pub fn default_api_url() -> String {
        "https://api.1inch.dev".to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    /// USDC on Ethereum mainnet
    pub fn default_quote_token() -> String {
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string()
    }
}

impl TryFrom<CommonUpstreamConfig> for UpstreamConfig {
    type Error = anyhow::Error;

    fn try_from(common_config: CommonUpstreamConfig) -> anyhow::Result<Self> {
        let api_url = common_config
            .api_url
            .unwrap_or_else(CommonUpstreamConfig::default_api_url);
        Ok(Self {
            api_url: url::Url::parse(&api_url).map_err(|err| {
                anyhow::anyhow!("Invalid upstream `api_url` {:?}. Error: {}", api_url, err)
            })?,
            api_key: required_value("api_key", common_config.api_key)?,
            request_timeout: std::time::Duration::from_secs(
                common_config
                    .request_timeout_secs
                    .unwrap_or_else(CommonUpstreamConfig::default_request_timeout_secs),
            ),
            quote_token: common_config
                .quote_token
                .unwrap_or_else(CommonUpstreamConfig::default_quote_token),
        })
    }
}
