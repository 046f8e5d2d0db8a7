use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

/// Collections whose next path segment is a record id.
const ID_PARENTS: &[&str] = &["problems", "sessions"];

/// Counts requests and records their latency.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(duration);

    response
}

/// Collapses record ids into `{id}` to keep label cardinality bounded.
/// Imported ids are arbitrary strings, so ids are recognized by position.
fn normalize_path(path: &str) -> String {
    let mut normalized = Vec::new();
    let mut previous = "";

    for segment in path.split('/') {
        if !segment.is_empty() && ID_PARENTS.contains(&previous) {
            normalized.push("{id}");
        } else {
            normalized.push(segment);
        }
        previous = segment;
    }

    normalized.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/api/problems/550e8400-e29b-41d4-a716-446655440000"),
            "/api/problems/{id}"
        );
        assert_eq!(
            normalize_path("/api/problems/two-sum/solutions"),
            "/api/problems/{id}/solutions"
        );
        assert_eq!(normalize_path("/api/sessions/42"), "/api/sessions/{id}");
        assert_eq!(normalize_path("/api/problems"), "/api/problems");
        assert_eq!(normalize_path("/api/problems/"), "/api/problems/");
        assert_eq!(normalize_path("/metrics"), "/metrics");
    }
}
