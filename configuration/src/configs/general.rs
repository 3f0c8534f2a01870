use serde_derive::Deserialize;

use crate::configs::deserialize_optional_data_or_env;

#[derive(Debug, Clone)]
pub struct GeneralProxyServerConfig {
    pub chain_id: u64,
    pub server_port: u16,
}

#[derive(Debug, Clone)]
pub struct GeneralDashboardConfig {
    pub chain_id: u64,
    pub proxy_url: url::Url,
    pub page_size: usize,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommonGeneralConfig {
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub proxy_server: CommonGeneralProxyServerConfig,
    #[serde(default)]
    pub dashboard: CommonGeneralDashboardConfig,
}

impl CommonGeneralConfig {
    /// Ethereum mainnet
    pub fn default_chain_id() -> u64 {
        1
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommonGeneralProxyServerConfig {
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub server_port: Option<u16>,
}

impl CommonGeneralProxyServerConfig {
    pub fn default_server_port() -> u16 {
        4000
    }
}

impl Default for CommonGeneralProxyServerConfig {
    fn default() -> Self {
        Self {
            server_port: Some(Self::default_server_port()),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CommonGeneralDashboardConfig {
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub proxy_url: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_data_or_env", default)]
    pub page_size: Option<usize>,
}

impl CommonGeneralDashboardConfig {
    pub fn default_proxy_url() -> String {
        "http://localhost:4000".to_string()
    }

    pub fn default_page_size() -> usize {
        12
    }
}

impl Default for CommonGeneralDashboardConfig {
    fn default() -> Self {
        Self {
            proxy_url: Some(Self::default_proxy_url()),
            page_size: Some(Self::default_page_size()),
        }
    }
}

impl From<CommonGeneralConfig> for GeneralProxyServerConfig {
    fn from(common_config: CommonGeneralConfig) -> Self {
        Self {
            chain_id: common_config
                .chain_id
                .unwrap_or_else(CommonGeneralConfig::default_chain_id),
            server_port: common_config
                .proxy_server
                .server_port
                .unwrap_or_else(CommonGeneralProxyServerConfig::default_server_port),
        }
    }
}

impl TryFrom<CommonGeneralConfig> for GeneralDashboardConfig {
    type Error = anyhow::Error;

    fn try_from(common_config: CommonGeneralConfig) -> anyhow::Result<Self> {
        let proxy_url = common_config
            .dashboard
            .proxy_url
            .unwrap_or_else(CommonGeneralDashboardConfig::default_proxy_url);
        let page_size = common_config
            .dashboard
            .page_size
            .unwrap_or_else(CommonGeneralDashboardConfig::default_page_size);
        if page_size == 0 {
            anyhow::bail!("`page_size` must be greater than zero");
        }
        Ok(Self {
            chain_id: common_config
                .chain_id
                .unwrap_or_else(CommonGeneralConfig::default_chain_id),
            proxy_url: url::Url::parse(&proxy_url).map_err(|err| {
                anyhow::anyhow!("Invalid `proxy_url` {:?}. Error: {}", proxy_url, err)
            })?,
            page_size,
        })
    }
}
