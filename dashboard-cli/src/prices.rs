use dashboard_primitives::formatting::{format_price, shorten_address};
use dashboard_primitives::PricePoint;

use crate::proxy_client::ProxyClient;

pub(crate) fn render_point(point: &PricePoint) -> String {
    format!("{}  {}", point.date_label(), format_price(point.v))
}

pub(crate) async fn run(proxy: &ProxyClient, token: &str, period: &str) -> anyhow::Result<()> {
    let token = crate::config::require_address(token)?;
    let body = proxy.get_json(&["api", token, "prices", period]).await?;
    let points: Vec<PricePoint> = serde_json::from_value(body)?;

    println!(
        "{} price points for {} over {}",
        points.len(),
        shorten_address(token),
        period
    );
    for point in &points {
        println!("{}", render_point(point));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_lines() {
        assert_eq!(
            render_point(&PricePoint { t: 1714521600, v: 3012.456 }),
            "2024-05-01  $3012.46"
        );
        assert_eq!(
            render_point(&PricePoint { t: 1714608000, v: 0.00042 }),
            "2024-05-02  $0.000420"
        );
    }
}
