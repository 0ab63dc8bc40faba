use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Requests served under `/api/v1`, by route pattern and status.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "tube_http_requests_total",
        "HTTP requests segmented by method, route and status",
        &["method", "route", "status"]
    )
    .expect("failed to register tube_http_requests_total");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "tube_http_request_duration_seconds",
        "HTTP request latency segmented by method and route",
        &["method", "route"]
    )
    .expect("failed to register tube_http_request_duration_seconds");

    /// Like and subscription toggles by target and outcome (created/removed).
    pub static ref TOGGLE_TOTAL: IntCounterVec = register_int_counter_vec!(
        "tube_toggle_total",
        "Toggle operations segmented by target and outcome",
        &["target", "outcome"]
    )
    .expect("failed to register tube_toggle_total");
}

pub fn record_request(method: &str, route: &str, status: u16, elapsed_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, route, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, route])
        .observe(elapsed_secs);
}

pub fn record_toggle(target: &str, outcome: &str) {
    TOGGLE_TOTAL.with_label_values(&[target, outcome]).inc();
}
