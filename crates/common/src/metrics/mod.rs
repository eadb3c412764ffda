//! Metrics and observability utilities
//!
//! Counters and histograms are recorded through the `metrics` facade; the
//! gateway decides whether a Prometheus exporter is installed.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all PaperCheck metrics
pub const METRICS_PREFIX: &str = "papercheck";

/// Buckets for database statement latency (in seconds)
pub const DB_LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.025, // 25ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    5.000, // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_health_checks_total", METRICS_PREFIX),
        Unit::Count,
        "Health checks by outcome"
    );

    describe_counter!(
        format!("{}_db_operations_total", METRICS_PREFIX),
        Unit::Count,
        "Repository operations by entity and kind"
    );

    describe_counter!(
        format!("{}_db_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Failed repository operations"
    );

    describe_histogram!(
        format!("{}_db_operation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Repository operation latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Record the outcome of a `/health` check
pub fn record_health_check(healthy: bool) {
    let status = if healthy { "healthy" } else { "unhealthy" };
    counter!(
        format!("{}_health_checks_total", METRICS_PREFIX),
        "status" => status
    )
    .increment(1);
}

/// Record a completed repository operation
pub fn record_db_operation(entity: &'static str, operation: &'static str) {
    counter!(
        format!("{}_db_operations_total", METRICS_PREFIX),
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}

/// Times one repository operation
pub struct DbOperationTimer {
    start: Instant,
    entity: &'static str,
    operation: &'static str,
}

impl DbOperationTimer {
    /// Start timing an operation
    pub fn start(entity: &'static str, operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            entity,
            operation,
        }
    }

    /// Record completion; failures only bump the error counter
    pub fn finish(self, success: bool) {
        if success {
            record_db_operation(self.entity, self.operation);
            histogram!(
                format!("{}_db_operation_duration_seconds", METRICS_PREFIX),
                "entity" => self.entity,
                "operation" => self.operation
            )
            .record(self.start.elapsed().as_secs_f64());
        } else {
            counter!(
                format!("{}_db_errors_total", METRICS_PREFIX),
                "entity" => self.entity,
                "operation" => self.operation
            )
            .increment(1);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        register_metrics();
        record_health_check(true);
        record_health_check(false);
        DbOperationTimer::start("paper", "create").finish(true);
        DbOperationTimer::start("paper", "delete").finish(false);
    }

    #[test]
    fn test_timer_labels_by_entity_and_operation() {
        let recorder = test_recorder::CapturingRecorder::default();
        metrics::with_local_recorder(&recorder, || {
            DbOperationTimer::start("paper", "find").finish(true);
            DbOperationTimer::start("extract", "delete").finish(false);
            record_health_check(false);
        });

        let touched = recorder.touched();
        assert!(touched.contains(&"papercheck_db_operations_total{entity=paper,operation=find}".to_string()));
        assert!(touched.contains(&"papercheck_db_operation_duration_seconds{entity=paper,operation=find}".to_string()));
        assert!(touched.contains(&"papercheck_db_errors_total{entity=extract,operation=delete}".to_string()));
        assert!(touched.contains(&"papercheck_health_checks_total{status=unhealthy}".to_string()));
    }

    #[test]
    fn test_buckets_are_sorted() {
        assert!(DB_LATENCY_BUCKETS.windows(2).all(|w| w[0] < w[1]));
    }
}
