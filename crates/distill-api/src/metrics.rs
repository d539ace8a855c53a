//! Prometheus metrics for monitoring API performance and search usage.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use distill_search::SearchFilters;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("numeric pattern is valid"));

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new()
        // Request and search durations (in seconds)
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .set_buckets_for_metric(
            Matcher::Full("search_results".to_string()),
            &[0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0],
        )?;

    let handle = builder.install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();

    // Prefer the route template; fall back to normalizing the raw path to
    // keep label cardinality bounded
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| normalize_path(req.uri().path()), |p| p.as_str().to_string());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Normalize URL paths to reduce cardinality in metrics
/// Replaces UUIDs and numeric IDs with placeholders
fn normalize_path(path: &str) -> String {
    let normalized = UUID_SEGMENT.replace_all(path, ":id");
    NUMERIC_SEGMENT
        .replace_all(&normalized, "/:id")
        .into_owned()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record database query metrics
pub fn record_db_query(query_name: &'static str, duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        "db_queries_total",
        "query" => query_name,
        "status" => status
    )
    .increment(1);

    histogram!(
        "db_query_duration_seconds",
        "query" => query_name
    )
    .record(duration_secs);
}

/// Record a completed global search
pub fn record_search(filters: &SearchFilters, total: usize, duration_secs: f64) {
    let type_filter = filters.type_filter.map_or("all", |t| t.as_str());
    let sort = filters.sort_by.as_str();

    counter!(
        "search_requests_total",
        "type" => type_filter,
        "sort" => sort
    )
    .increment(1);

    histogram!("search_results").record(total as f64);

    histogram!(
        "search_duration_seconds",
        "type" => type_filter
    )
    .record(duration_secs);
}
