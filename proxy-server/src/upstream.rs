use crate::errors::ProxyError;

/// UpstreamClient forwards dashboard requests to the data provider,
/// attaching the API key every provider endpoint requires.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    api_url: url::Url,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &configuration::UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Builds `<api_url>/<segments...>?<query>`. Segments are percent-encoded,
    /// so user supplied addresses cannot escape their path position.
    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<url::Url, ProxyError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::Transport(format!("Invalid upstream url: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Performs a GET call and returns the JSON body as is.
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        method_name: &str,
    ) -> Result<serde_json::Value, ProxyError> {
        let url = self.url(segments, query)?;
        tracing::debug!(target: crate::PROXY_SERVER, "PROXY call `{}`. {}", method_name, url);
        crate::metrics::UPSTREAM_REQUESTS_COUNTER
            .with_label_values(&[method_name])
            .inc();

        let result = self.send(url).await;
        if let Err(err) = &result {
            tracing::warn!(target: crate::PROXY_SERVER, "Error in `{}` call: {}", method_name, err);
            crate::metrics::UPSTREAM_ERRORS_COUNTER
                .with_label_values(&[method_name])
                .inc();
        }
        result
    }

    async fn send(&self, url: url::Url) -> Result<serde_json::Value, ProxyError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                message: body,
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
