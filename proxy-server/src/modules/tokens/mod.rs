pub mod methods;

/// Maps the period of the dashboard route (`7d`) to the provider's chart period (`1W`).
pub(crate) fn chart_period(period: &str) -> Option<&'static str> {
    match period.to_ascii_lowercase().as_str() {
        "1d" | "24h" => Some("24H"),
        "7d" | "1w" => Some("1W"),
        "30d" | "1m" => Some("1M"),
        "1y" => Some("1Y"),
        "all" | "alltime" => Some("AllTime"),
        _ => None,
    }
}

/// Extracts the price series from a provider chart body, `{"data": [...]}` or a bare array.
pub(crate) fn price_points(
    chart: &serde_json::Value,
) -> Result<Vec<dashboard_primitives::PricePoint>, crate::errors::ProxyError> {
    let entries = chart
        .get("data")
        .unwrap_or(chart)
        .as_array()
        .ok_or_else(|| {
            crate::errors::ProxyError::MalformedResponse(
                "chart body holds no price series".to_string(),
            )
        })?;
    entries
        .iter()
        .map(|entry| {
            dashboard_primitives::PricePoint::from_chart_entry(entry).ok_or_else(|| {
                crate::errors::ProxyError::MalformedResponse(format!(
                    "invalid chart entry: {}",
                    entry
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_aliases() {
        assert_eq!(chart_period("7d"), Some("1W"));
        assert_eq!(chart_period("24H"), Some("24H"));
        assert_eq!(chart_period("1y"), Some("1Y"));
        assert_eq!(chart_period("all"), Some("AllTime"));
        assert_eq!(chart_period("5m"), None);
    }

    #[test]
    fn price_series_shapes() {
        let wrapped = serde_json::json!({"data": [{"time": 1, "value": 2.0}]});
        assert_eq!(price_points(&wrapped).unwrap().len(), 1);

        let bare = serde_json::json!([{"t": 1, "v": "2.0"}, {"t": 2, "v": 3}]);
        assert_eq!(price_points(&bare).unwrap().len(), 2);

        assert!(price_points(&serde_json::json!({"data": "nope"})).is_err());
        assert!(price_points(&serde_json::json!([{"time": 1}])).is_err());
    }
}
