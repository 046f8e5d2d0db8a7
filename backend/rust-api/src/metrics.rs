use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref PROBLEM_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "problem_operations_total",
        "Total number of problem mutations",
        &["operation"]
    )
    .unwrap();

    pub static ref SOLUTIONS_RECORDED_TOTAL: IntCounter = register_int_counter!(
        "solutions_recorded_total",
        "Total number of solutions recorded"
    )
    .unwrap();

    pub static ref SESSIONS_RECORDED_TOTAL: IntCounter = register_int_counter!(
        "study_sessions_recorded_total",
        "Total number of study sessions logged"
    )
    .unwrap();

    pub static ref STATS_COMPUTATIONS_TOTAL: IntCounter = register_int_counter!(
        "stats_computations_total",
        "Total number of progress statistics computations"
    )
    .unwrap();

    pub static ref IMPORTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "imports_total",
        "Total number of import attempts",
        &["outcome"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}
