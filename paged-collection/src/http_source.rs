use dashboard_primitives::{PageRequest, PageResult};

use crate::errors::PageFetchError;
use crate::source::PageSource;
use crate::PAGER;

/// Path segment replaced by the resource key, as it looks after URL parsing.
const KEY_PLACEHOLDER: &str = "%7Bkey%7D";
const KEY_QUERY_PARAM: &str = "key";

/// `PageSource` over a JSON HTTP endpoint paged with `limit`/`offset` query parameters.
///
/// The resource key goes into the path when the endpoint has a `{key}` segment
/// (`http://localhost:4000/api/fetchNfts/{key}`), otherwise into the `key` query parameter.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    endpoint: url::Url,
    items_field: Option<String>,
    continuation_field: Option<String>,
    limit_param: String,
    offset_param: String,
}

impl HttpPageSource {
    pub fn new(endpoint: &str, client: reqwest::Client) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            endpoint: url::Url::parse(endpoint)?,
            items_field: None,
            continuation_field: None,
            limit_param: "limit".to_string(),
            offset_param: "offset".to_string(),
        })
    }

    /// Field of an object body holding the items. Without it only bare JSON arrays are accepted.
    pub fn items_field(mut self, field: &str) -> Self {
        self.items_field = Some(field.to_string());
        self
    }

    pub fn continuation_field(mut self, field: &str) -> Self {
        self.continuation_field = Some(field.to_string());
        self
    }

    pub fn limit_param(mut self, param: &str) -> Self {
        self.limit_param = param.to_string();
        self
    }

    pub fn offset_param(mut self, param: &str) -> Self {
        self.offset_param = param.to_string();
        self
    }

    pub(crate) fn request_url(&self, request: &PageRequest) -> url::Url {
        let mut url = self.endpoint.clone();

        let segments: Option<Vec<String>> = url.path_segments().map(|segments| {
            segments
                .map(|segment| segment.to_string())
                .collect::<Vec<_>>()
        });
        let key_in_path = segments
            .as_ref()
            .is_some_and(|segments| segments.iter().any(|segment| segment == KEY_PLACEHOLDER));

        if let (true, Some(segments)) = (key_in_path, segments) {
            if let Ok(mut path) = url.path_segments_mut() {
                path.clear().extend(segments.iter().map(|segment| {
                    if segment == KEY_PLACEHOLDER {
                        request.resource_key.as_str()
                    } else {
                        segment.as_str()
                    }
                }));
            }
        }

        {
            let mut query = url.query_pairs_mut();
            if !key_in_path {
                query.append_pair(KEY_QUERY_PARAM, &request.resource_key);
            }
            query
                .append_pair(&self.limit_param, &request.page_size.to_string())
                .append_pair(&self.offset_param, &request.page_offset.to_string());
            for (name, value) in &request.filter {
                query.append_pair(name, value);
            }
        }
        url
    }

    pub(crate) fn parse_page(&self, body: serde_json::Value) -> Result<PageResult, PageFetchError> {
        match body {
            serde_json::Value::Array(items) => Ok(PageResult::new(items, None)),
            serde_json::Value::Object(mut fields) => {
                let items_field = self.items_field.as_deref().ok_or_else(|| {
                    PageFetchError::MalformedBody(
                        "expected a JSON array of items, got an object".to_string(),
                    )
                })?;
                let items = match fields.remove(items_field) {
                    Some(serde_json::Value::Array(items)) => items,
                    // `{"assets": null}` and a missing field both mean an empty page
                    Some(serde_json::Value::Null) | None => vec![],
                    Some(other) => {
                        return Err(PageFetchError::MalformedBody(format!(
                            "field `{}` is not an array: {}",
                            items_field, other
                        )))
                    }
                };
                let continuation_token = self
                    .continuation_field
                    .as_deref()
                    .and_then(|field| fields.remove(field))
                    .and_then(|token| match token {
                        serde_json::Value::String(token) if !token.is_empty() => Some(token),
                        _ => None,
                    });
                Ok(PageResult::new(items, continuation_token))
            }
            other => Err(PageFetchError::MalformedBody(format!(
                "expected a JSON array or object, got: {}",
                other
            ))),
        }
    }
}

#[async_trait::async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, PageFetchError> {
        let url = self.request_url(request);
        tracing::debug!(target: PAGER, "GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageFetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.bytes().await?;
        let body = serde_json::from_slice::<serde_json::Value>(&body)?;
        self.parse_page(body)
    }
}
