use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod configs;
mod default_env_configs;

pub use crate::configs::general::{GeneralDashboardConfig, GeneralProxyServerConfig};
pub use crate::configs::upstream::UpstreamConfig;
pub use crate::configs::{CommonConfig, DashboardConfig, ProxyServerConfig};

fn parse_toml<T>(content: &str) -> anyhow::Result<T>
where
    T: TryFrom<CommonConfig, Error = anyhow::Error>,
{
    let common_config = toml::from_str::<CommonConfig>(content)
        .map_err(|err| anyhow::anyhow!("Unable to parse configuration.\n Error: {}", err))?;
    T::try_from(common_config)
}

async fn read_toml_file<T>(path_file: &Path) -> anyhow::Result<T>
where
    T: TryFrom<CommonConfig, Error = anyhow::Error>,
{
    match std::fs::read_to_string(path_file) {
        Ok(content) => parse_toml(&content).map_err(|err| {
            anyhow::anyhow!(
                "Unable to load data from: {:?}.\n Error: {}",
                path_file.to_str(),
                err
            )
        }),
        Err(err) => {
            anyhow::bail!(
                "Could not read file: {:?}.\n Error: {}",
                path_file.to_str(),
                err
            );
        }
    }
}

pub async fn read_configuration_from_file<T>(path_file: &str) -> anyhow::Result<T>
where
    T: TryFrom<CommonConfig, Error = anyhow::Error>,
{
    let path_file = Path::new(path_file);
    read_toml_file(path_file).await
}

/// Reads `config.toml` from the working directory if present,
/// otherwise the built-in template resolved against the environment.
pub async fn read_configuration<T>() -> anyhow::Result<T>
where
    T: TryFrom<CommonConfig, Error = anyhow::Error>,
{
    dotenv::dotenv().ok();
    let mut path_root = std::env::current_dir()?;
    path_root.push("config.toml");
    if path_root.exists() {
        read_toml_file(path_root.as_path()).await
    } else {
        parse_toml(default_env_configs::DEFAULT_CONFIG)
    }
}

pub async fn init_tracing(service_name: &str) -> anyhow::Result<()> {
    let mut env_filter = tracing_subscriber::EnvFilter::new(format!("{}=info", service_name));

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        if !rust_log.is_empty() {
            for directive in rust_log.split(',').filter_map(|s| match s.parse() {
                Ok(directive) => Some(directive),
                Err(err) => {
                    eprintln!("Ignoring directive `{}`: {}", s, err);
                    None
                }
            }) {
                env_filter = env_filter.add_directive(directive);
            }
        }
    }

    let subscriber = tracing_subscriber::Registry::default().with(env_filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        subscriber
            .with(tracing_subscriber::fmt::Layer::default().json())
            .try_init()?;
    } else {
        subscriber
            .with(tracing_subscriber::fmt::Layer::default().compact())
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_builds_dashboard_config() {
        let config: DashboardConfig = parse_toml(default_env_configs::DEFAULT_CONFIG).unwrap();
        assert!(config.general.page_size > 0);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = read_configuration_from_file::<DashboardConfig>("/nonexistent/config.toml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Could not read file"));
    }
}
