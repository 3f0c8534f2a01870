use dashboard_primitives::formatting::shorten_address;
use dashboard_primitives::TokenBalance;

use crate::proxy_client::ProxyClient;

/// Reads the `{"data": {<token address>: <entry>}}` body of the balance route.
pub(crate) fn balance_rows(body: &serde_json::Value) -> Vec<TokenBalance> {
    TokenBalance::from_balances_map(body.get("data").unwrap_or(&serde_json::Value::Null))
}

pub(crate) fn render_row(balance: &TokenBalance) -> String {
    format!(
        "{:<10} {:<16} {}",
        balance.symbol.as_deref().unwrap_or("?"),
        shorten_address(&balance.token_address),
        balance.formatted_balance()
    )
}

pub(crate) async fn run(proxy: &ProxyClient, address: &str) -> anyhow::Result<()> {
    let address = crate::config::require_address(address)?;
    let body = proxy.get_json(&["getBalance", address]).await?;
    let rows = balance_rows(&body);

    println!("{} tokens found for {}", rows.len(), shorten_address(address));
    for row in &rows {
        println!("{}", render_row(row));
    }
    Ok(())
}
