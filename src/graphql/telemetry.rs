use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_graphql::parser::parse_query;
use async_graphql::{Request, Response};

use super::DirectorySchema;

/// Name recorded for requests that do not name their operation.
pub const ANONYMOUS_OPERATION: &str = "anonymous";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
    pub count: u64,
    pub total: Duration,
    pub max: Duration,
}

impl OperationStats {
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(self.count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Per-operation request counts and durations for the life of the server.
#[derive(Default)]
pub struct RequestStats {
    operations: Mutex<HashMap<String, OperationStats>>,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, operation: &str, elapsed: Duration) {
        let mut operations = self.operations.lock().unwrap_or_else(|e| e.into_inner());
        let stats = operations.entry(operation.to_string()).or_default();
        stats.count += 1;
        stats.total += elapsed;
        stats.max = stats.max.max(elapsed);
    }

    /// Stats for every recorded operation, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, OperationStats)> {
        let operations = self.operations.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries: Vec<_> = operations
            .iter()
            .map(|(name, stats)| (name.clone(), *stats))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn log_summary(&self) {
        let entries = self.snapshot();
        if entries.is_empty() {
            return;
        }
        tracing::info!("Performance summary");
        for (operation, stats) in entries {
            tracing::info!(
                operation = %operation,
                count = stats.count,
                avg_ms = stats.average().as_secs_f64() * 1000.0,
                max_ms = stats.max.as_secs_f64() * 1000.0,
            );
        }
    }
}

/// Name to record a request under.
///
/// A client-supplied operation name only counts when the document defines
/// it, so stats keys are bounded by the operations actually sent. A document
/// with a single named operation is recorded under that name.
pub fn operation_label(request: &Request) -> String {
    let Ok(document) = parse_query(&request.query) else {
        return ANONYMOUS_OPERATION.to_string();
    };
    let mut names = document.operations.iter().map(|(name, _)| name);

    let label = match request.operation_name.as_deref() {
        Some(requested) => names
            .any(|name| name.is_some_and(|n| n.as_str() == requested))
            .then(|| requested.to_string()),
        None => match (names.next(), names.next()) {
            (Some(Some(name)), None) => Some(name.to_string()),
            _ => None,
        },
    };
    label.unwrap_or_else(|| ANONYMOUS_OPERATION.to_string())
}

/// Execute `request`, record its duration, and warn when it is slow.
pub async fn execute_timed(
    schema: &DirectorySchema,
    request: Request,
    stats: &RequestStats,
    slow_threshold: Duration,
) -> Response {
    let operation = operation_label(&request);

    let started = Instant::now();
    let response = schema.execute(request).await;
    let elapsed = started.elapsed();

    stats.record(&operation, elapsed);
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    if elapsed > slow_threshold {
        tracing::warn!(operation = %operation, elapsed_ms, "Slow operation detected");
    } else {
        tracing::debug!(operation = %operation, elapsed_ms, "GraphQL request");
    }

    response
}
