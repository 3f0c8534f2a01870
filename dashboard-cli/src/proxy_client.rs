/// Thin client for the non-paged proxy routes
#[derive(Clone, Debug)]
pub struct ProxyClient {
    client: reqwest::Client,
    proxy_url: url::Url,
}

impl ProxyClient {
    pub fn new(proxy_url: url::Url, client: reqwest::Client) -> Self {
        Self { client, proxy_url }
    }

    pub fn url(&self, segments: &[&str]) -> anyhow::Result<url::Url> {
        let mut url = self.proxy_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Invalid proxy url: {}", self.proxy_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json(&self, segments: &[&str]) -> anyhow::Result<serde_json::Value> {
        let url = self.url(segments)?;
        tracing::debug!(target: crate::DASHBOARD, "GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            anyhow::bail!("{} ({})", error_message(&body), status);
        }
        Ok(response.json().await?)
    }
}

/// Extracts the `{"error": ...}` message the proxy renders for failed calls.
fn error_message(body: &serde_json::Value) -> String {
    body.get("error")
        .and_then(|error| error.as_str())
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_encoded() {
        let client = ProxyClient::new(
            url::Url::parse("http://localhost:4000").unwrap(),
            reqwest::Client::new(),
        );
        assert_eq!(
            client.url(&["getBalance", "0xab cd"]).unwrap().as_str(),
            "http://localhost:4000/getBalance/0xab%20cd"
        );
        assert_eq!(
            client.url(&["api", "0xtoken", "prices", "7d"]).unwrap().as_str(),
            "http://localhost:4000/api/0xtoken/prices/7d"
        );
    }

    #[test]
    fn proxy_error_body() {
        assert_eq!(
            error_message(&serde_json::json!({"error": "Please enter a wallet address"})),
            "Please enter a wallet address"
        );
        assert_eq!(error_message(&serde_json::Value::Null), "Request failed");
    }
}
