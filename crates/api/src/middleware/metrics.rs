//! Prometheus metrics middleware and exporter.

use std::sync::OnceLock;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Call once at startup, before any
/// metrics are emitted.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");
    let _ = PROMETHEUS_HANDLE.set(handle);
}

/// Renders the current metrics in Prometheus text exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Records request count and latency per method/path/status.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let method = method_to_str(req.method());
    let path = normalize_path(req.uri().path());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let elapsed = start.elapsed().as_secs_f64();

    counter!(
        "http_requests_total",
        "method" => method,
        "path" => path.clone(),
        "status" => status,
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
    )
    .record(elapsed);

    response
}

/// Counts email delivery attempts by outcome ("sent" or "failed").
pub fn record_email_delivery(outcome: &'static str) {
    counter!("email_deliveries_total", "outcome" => outcome).increment(1);
}

/// Counts automation prompt triggers by trigger type.
pub fn record_automation_trigger(trigger_type: &str) {
    counter!("automation_triggers_total", "trigger" => trigger_type.to_string()).increment(1);
}

/// Counts ad moderation decisions ("approved" or "rejected").
pub fn record_ad_decision(decision: &'static str) {
    counter!("ad_decisions_total", "decision" => decision).increment(1);
}

fn method_to_str(method: &axum::http::Method) -> &'static str {
    match *method {
        axum::http::Method::GET => "GET",
        axum::http::Method::POST => "POST",
        axum::http::Method::PUT => "PUT",
        axum::http::Method::PATCH => "PATCH",
        axum::http::Method::DELETE => "DELETE",
        axum::http::Method::HEAD => "HEAD",
        axum::http::Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

/// Collapses path segments that look like identifiers to keep metric
/// cardinality bounded.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.is_empty() {
                segment.to_string()
            } else if uuid::Uuid::parse_str(segment).is_ok()
                || segment.chars().all(|c| c.is_ascii_digit())
            {
                ":id".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_replaces_uuid() {
        let path = "/api/campaigns/550e8400-e29b-41d4-a716-446655440000/ads";
        assert_eq!(normalize_path(path), "/api/campaigns/:id/ads");
    }

    #[test]
    fn test_normalize_path_replaces_numeric() {
        assert_eq!(normalize_path("/api/tags/42"), "/api/tags/:id");
    }

    #[test]
    fn test_normalize_path_keeps_names() {
        assert_eq!(normalize_path("/api/auth/login"), "/api/auth/login");
    }

    #[test]
    fn test_method_to_str() {
        assert_eq!(method_to_str(&axum::http::Method::GET), "GET");
        assert_eq!(method_to_str(&axum::http::Method::TRACE), "OTHER");
    }
}
