use actix_web::{get, Responder};
use prometheus::{Encoder, IntCounterVec, Opts};

type Result<T, E> = std::result::Result<T, E>;

fn try_create_int_counter_vec(
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<IntCounterVec, prometheus::Error> {
    let opts = Opts::new(name, help);
    let counter = IntCounterVec::new(opts, labels)?;
    prometheus::register(Box::new(counter.clone()))?;
    Ok(counter)
}

lazy_static! {
    pub(crate) static ref ROUTE_CALLS_COUNTER: IntCounterVec = try_create_int_counter_vec(
        "route_calls_counter",
        "Total number of calls to each route of the proxy",
        &["route"]
    )
    .unwrap();
    pub(crate) static ref UPSTREAM_REQUESTS_COUNTER: IntCounterVec = try_create_int_counter_vec(
        "upstream_requests_counter",
        "Total number of requests forwarded to the upstream provider",
        &["method_name"]
    )
    .unwrap();
    pub(crate) static ref UPSTREAM_ERRORS_COUNTER: IntCounterVec = try_create_int_counter_vec(
        "upstream_errors_counter",
        "Total number of failed upstream requests (transport, non-2xx or malformed body)",
        &["method_name"]
    )
    .unwrap();
}

/// Exposes prometheus metrics
#[get("/metrics")]
pub(crate) async fn get_metrics() -> impl Responder {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!(target: crate::PROXY_SERVER, "could not encode metrics: {}", e);
    };

    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(
                target: crate::PROXY_SERVER,
                "custom metrics could not be from_utf8'd: {}",
                e
            );
            String::default()
        }
    }
}
