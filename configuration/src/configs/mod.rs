use std::str::FromStr;

use serde::Deserialize;

pub(crate) mod general;
pub(crate) mod upstream;

lazy_static::lazy_static! {
    static ref RE_NAME_ENV: regex::Regex = regex::Regex::new(r"\$\{(?<env_name>\w+)}").unwrap();
}

fn get_env_var<T>(env_var_name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    let var = dotenv::var(env_var_name).map_err(|err| {
        anyhow::anyhow!(
            "Failed to get env var: {:?}. Error: {:?}",
            env_var_name,
            err
        )
    })?;
    var.parse::<T>().map_err(|err| {
        anyhow::anyhow!(
            "Failed to parse env var: {:?}. Error: {:?}",
            env_var_name,
            err
        )
    })
}

fn deserialize_data_or_env<'de, D, T>(data: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + FromStr,
    <T as FromStr>::Err: std::fmt::Debug,
{
    let value = serde_json::Value::deserialize(data)?;
    if let serde_json::Value::String(value) = &value {
        if let Some(caps) = RE_NAME_ENV.captures(value) {
            return get_env_var::<T>(&caps["env_name"]).map_err(serde::de::Error::custom);
        }
        // Plain strings are allowed for numeric values, e.g. `server_port = "4000"`
        if let Ok(parsed) = value.parse::<T>() {
            return Ok(parsed);
        }
    }
    serde_json::from_value::<T>(value).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_data_or_env<'de, D, T>(data: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + FromStr,
    <T as FromStr>::Err: std::fmt::Debug,
{
    Ok(match deserialize_data_or_env(data) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("Failed to deserialize_optional_data_or_env: {:?}", err);
            None
        }
    })
}

pub(crate) fn required_value<T>(value_name: &str, value: Option<T>) -> anyhow::Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("Value `{}` is required but not provided", value_name))
}

#[derive(serde_derive::Deserialize, Debug, Clone, Default)]
pub struct CommonConfig {
    #[serde(default)]
    pub general: general::CommonGeneralConfig,
    #[serde(default)]
    pub upstream: upstream::CommonUpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct ProxyServerConfig {
    pub general: general::GeneralProxyServerConfig,
    pub upstream: upstream::UpstreamConfig,
}

impl TryFrom<CommonConfig> for ProxyServerConfig {
    type Error = anyhow::Error;

    fn try_from(common_config: CommonConfig) -> anyhow::Result<Self> {
        Ok(Self {
            general: common_config.general.into(),
            upstream: common_config.upstream.try_into()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub general: general::GeneralDashboardConfig,
}

impl TryFrom<CommonConfig> for DashboardConfig {
    type Error = anyhow::Error;

    fn try_from(common_config: CommonConfig) -> anyhow::Result<Self> {
        Ok(Self {
            general: common_config.general.try_into()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_placeholders_are_resolved() {
        std::env::set_var("CONFIGURATION_TEST_SERVER_PORT", "4100");
        std::env::set_var("CONFIGURATION_TEST_API_KEY", "secret");
        let config: CommonConfig = toml::from_str(
            r#"
            [general.proxy_server]
            server_port = "${CONFIGURATION_TEST_SERVER_PORT}"

            [upstream]
            api_key = "${CONFIGURATION_TEST_API_KEY}"
            "#,
        )
        .unwrap();

        let proxy_config = ProxyServerConfig::try_from(config).unwrap();
        assert_eq!(proxy_config.general.server_port, 4100);
        assert_eq!(proxy_config.upstream.api_key, "secret");
    }

    #[test]
    fn missing_env_falls_back_to_defaults() {
        let config: CommonConfig = toml::from_str(
            r#"
            [general]
            chain_id = "${CONFIGURATION_TEST_UNSET_CHAIN_ID}"

            [general.dashboard]
            proxy_url = "${CONFIGURATION_TEST_UNSET_PROXY_URL}"
            "#,
        )
        .unwrap();

        let dashboard_config = DashboardConfig::try_from(config).unwrap();
        assert_eq!(dashboard_config.general.chain_id, 1);
        assert_eq!(dashboard_config.general.page_size, 12);
        assert_eq!(
            dashboard_config.general.proxy_url.as_str(),
            "http://localhost:4000/"
        );
    }

    #[test]
    fn unparsable_env_value_falls_back_to_default() {
        std::env::set_var("CONFIGURATION_TEST_BAD_PAGE_SIZE", "abc");
        let config: CommonConfig = toml::from_str(
            r#"
            [general.dashboard]
            page_size = "${CONFIGURATION_TEST_BAD_PAGE_SIZE}"
            "#,
        )
        .unwrap();

        let dashboard_config = DashboardConfig::try_from(config).unwrap();
        assert_eq!(dashboard_config.general.page_size, 12);
    }

    #[test]
    fn literal_values_are_accepted() {
        let config: CommonConfig = toml::from_str(
            r#"
            [general]
            chain_id = 137

            [general.dashboard]
            page_size = "50"
            "#,
        )
        .unwrap();

        let dashboard_config = DashboardConfig::try_from(config).unwrap();
        assert_eq!(dashboard_config.general.chain_id, 137);
        assert_eq!(dashboard_config.general.page_size, 50);
    }

    #[test]
    fn proxy_requires_api_key() {
        let config: CommonConfig = toml::from_str(
            r#"
            [upstream]
            api_key = "${CONFIGURATION_TEST_UNSET_API_KEY}"
            "#,
        )
        .unwrap();

        let err = ProxyServerConfig::try_from(config).unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config: CommonConfig = toml::from_str(
            r#"
            [general.dashboard]
            page_size = 0
            "#,
        )
        .unwrap();

        assert!(DashboardConfig::try_from(config).is_err());
    }
}
