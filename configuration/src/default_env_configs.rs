// This file to present all configuration around the environment variables
// Not present environment variables will be set to default values
// A `config.toml` in the working directory takes precedence over this template

pub const DEFAULT_CONFIG: &str = r#"
[general]
chain_id = "${CHAIN_ID}"

[general.proxy_server]
server_port = "${SERVER_PORT}"

[general.dashboard]
proxy_url = "${PROXY_URL}"
page_size = "${PAGE_SIZE}"

[upstream]
api_url = "${UPSTREAM_API_URL}"
api_key = "${INCH_APIKEY}"
request_timeout_secs = "${UPSTREAM_TIMEOUT_SECS}"
quote_token = "${QUOTE_TOKEN_ADDRESS}"
"#;
