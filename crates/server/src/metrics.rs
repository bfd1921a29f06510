use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static COMPANIES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "coronavstech_companies_created_total",
        "Companies successfully created"
    )
    .expect("register companies_created_total")
});

pub static COMPANIES_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "coronavstech_companies_rejected_total",
        "Create requests rejected by validation"
    )
    .expect("register companies_rejected_total")
});

pub static COMPANIES_LISTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "coronavstech_companies_listed_total",
        "List requests served"
    )
    .expect("register companies_listed_total")
});

/// Touch every counter so they show up in `/metrics` before the first request.
pub fn init() {
    Lazy::force(&COMPANIES_CREATED_TOTAL);
    Lazy::force(&COMPANIES_REJECTED_TOTAL);
    Lazy::force(&COMPANIES_LISTED_TOTAL);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
