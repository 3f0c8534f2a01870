use serde::{Deserialize, Serialize};

pub mod formatting;

/// Provider-defined record (NFT asset, balance entry, history event).
/// Never interpreted beyond counting.
pub type Item = serde_json::Value;

/// Extra query parameters scoping a listing, e.g. `chainIds=1`.
/// Ordered so the same filter always yields the same query string.
pub type Filter = std::collections::BTreeMap<String, String>;

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct PageRequest {
    pub resource_key: String,
    pub page_size: usize,
    pub page_offset: u64,
    pub filter: Filter,
}

impl PageRequest {
    pub fn new(resource_key: String, page_size: usize, page_offset: u64, filter: Filter) -> Self {
        Self {
            resource_key,
            page_size,
            page_offset,
            filter,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct PageResult {
    pub items: Vec<Item>,
    /// Opaque cursor some providers return next to offset paging. Passed through, never followed.
    pub continuation_token: Option<String>,
}

impl PageResult {
    pub fn new(items: Vec<Item>, continuation_token: Option<String>) -> Self {
        Self {
            items,
            continuation_token,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// ERC-20 holding of a wallet as reported by the balance endpoint.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct TokenBalance {
    pub token_address: String,
    /// Raw integer amount in the token's smallest unit
    pub balance: String,
    pub decimals: Option<u32>,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    fn into_string(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::String(string) => string,
        }
    }
}

#[derive(Deserialize)]
struct TokenBalanceDetails {
    balance: Option<NumberOrString>,
    decimals: Option<NumberOrString>,
    symbol: Option<String>,
    name: Option<String>,
}

impl TokenBalance {
    /// Builds a balance row from one entry of the upstream balance map.
    /// The provider either returns the bare raw amount or an object with token metadata.
    pub fn from_entry(token_address: &str, value: &serde_json::Value) -> Self {
        if let Ok(details) = serde_json::from_value::<TokenBalanceDetails>(value.clone()) {
            return Self {
                token_address: token_address.to_string(),
                balance: details
                    .balance
                    .map(NumberOrString::into_string)
                    .unwrap_or_default(),
                decimals: details
                    .decimals
                    .and_then(|decimals| decimals.into_string().parse().ok()),
                symbol: details.symbol,
                name: details.name,
            };
        }
        let balance = match value {
            serde_json::Value::String(balance) => balance.clone(),
            serde_json::Value::Number(balance) => balance.to_string(),
            _ => String::new(),
        };
        Self {
            token_address: token_address.to_string(),
            balance,
            decimals: None,
            symbol: None,
            name: None,
        }
    }

    /// Parses the whole `{ "<token address>": <entry>, ... }` map.
    pub fn from_balances_map(balances: &serde_json::Value) -> Vec<Self> {
        match balances {
            serde_json::Value::Object(entries) => entries
                .iter()
                .map(|(token_address, value)| Self::from_entry(token_address, value))
                .collect(),
            _ => vec![],
        }
    }

    pub fn formatted_balance(&self) -> String {
        // Without `decimals` the amount cannot be scaled. The raw integer is shown
        // rather than "0", so a held token never reads as an empty balance.
        formatting::format_balance(&self.balance, self.decimals.unwrap_or_default())
    }
}

fn deserialize_price<'de, D>(data: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match NumberOrString::deserialize(data)? {
        NumberOrString::Number(number) => number
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("price is not representable as f64")),
        NumberOrString::String(string) => string.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// One sample of a token price series. `t` is a unix timestamp in seconds.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
pub struct PricePoint {
    pub t: i64,
    #[serde(deserialize_with = "deserialize_price")]
    pub v: f64,
}

impl PricePoint {
    /// Reads one entry of a provider chart series, either `{"time", "value"}` or the short `{"t", "v"}` form.
    pub fn from_chart_entry(entry: &serde_json::Value) -> Option<Self> {
        let t = entry.get("time").or_else(|| entry.get("t"))?.as_i64()?;
        let v = match entry.get("value").or_else(|| entry.get("v"))? {
            serde_json::Value::Number(number) => number.as_f64()?,
            serde_json::Value::String(string) => string.trim().parse().ok()?,
            _ => return None,
        };
        Some(Self { t, v })
    }

    /// Calendar date of the sample in UTC, e.g. `2024-05-01`
    pub fn date_label(&self) -> String {
        chrono::DateTime::from_timestamp(self.t, 0)
            .map(|date_time| date_time.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.t.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_entry_with_metadata() {
        let value = serde_json::json!({
            "balance": "1500000",
            "decimals": 6,
            "symbol": "USDC",
            "name": "USD Coin"
        });
        let balance = TokenBalance::from_entry("0xa0b8", &value);
        assert_eq!(balance.decimals, Some(6));
        assert_eq!(balance.symbol.as_deref(), Some("USDC"));
        assert_eq!(balance.formatted_balance(), "1.5");
    }

    #[test]
    fn bare_balance_entry() {
        let balances = serde_json::json!({ "0xdac1": "42", "0xeeee": 7 });
        let mut rows = TokenBalance::from_balances_map(&balances);
        rows.sort_by(|a, b| a.token_address.cmp(&b.token_address));
        assert_eq!(rows[0].balance, "42");
        assert_eq!(rows[0].decimals, None);
        assert_eq!(rows[1].balance, "7");
        assert_eq!(rows[0].formatted_balance(), "42");
    }

    #[test]
    fn price_point_accepts_string_values() {
        let points: Vec<PricePoint> =
            serde_json::from_str(r#"[{"t": 1714521600, "v": "0.0042"}, {"t": 1714608000, "v": 3.5}]"#)
                .unwrap();
        assert_eq!(points[0].v, 0.0042);
        assert_eq!(points[1].v, 3.5);
        assert_eq!(points[0].date_label(), "2024-05-01");
    }

    #[test]
    fn chart_entries() {
        let point =
            PricePoint::from_chart_entry(&serde_json::json!({"time": 1714521600, "value": 1.25}))
                .unwrap();
        assert_eq!(point, PricePoint { t: 1714521600, v: 1.25 });
        let point =
            PricePoint::from_chart_entry(&serde_json::json!({"t": 1714521600, "v": "2.5"})).unwrap();
        assert_eq!(point.v, 2.5);
        assert_eq!(
            PricePoint::from_chart_entry(&serde_json::json!({"time": "yesterday", "value": 1})),
            None
        );
    }

    #[test]
    fn page_result_counts_items() {
        let page = PageResult::new(vec![serde_json::json!({}), serde_json::json!({})], None);
        assert_eq!(page.item_count(), 2);
    }
}
