use chrono::{DateTime, Utc};
use std::{
    cell::RefCell,
    rc::Rc,
    time::Instant,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScraperMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub bytes_received: u64,
    pub avg_response_time_ms: f64,
    pub last_error: Option<String>,
    pub last_error_time: Option<DateTime<Utc>>,
}

/// Request counters shared between a fetcher and whoever reports on the run.
/// Scraping is single-threaded, so a cloned handle is just another `Rc`.
#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: Rc<RefCell<ScraperMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request_start(&self) -> RequestTracker {
        RequestTracker {
            start_time: Instant::now(),
            collector: self.clone(),
        }
    }

    pub fn get_metrics(&self) -> ScraperMetrics {
        self.metrics.borrow().clone()
    }
}

pub struct RequestTracker {
    start_time: Instant,
    collector: MetricsCollector,
}

impl RequestTracker {
    pub fn succeed(self, bytes: usize) {
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut metrics = self.collector.metrics.borrow_mut();
        metrics.total_requests += 1;
        metrics.successful_requests += 1;
        metrics.bytes_received += bytes as u64;
        update_average(&mut metrics, elapsed_ms);
    }

    pub fn fail(self, error: String) {
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut metrics = self.collector.metrics.borrow_mut();
        metrics.total_requests += 1;
        metrics.failed_requests += 1;
        metrics.last_error = Some(error);
        metrics.last_error_time = Some(Utc::now());
        update_average(&mut metrics, elapsed_ms);
    }
}

// Exponential moving average, seeded by the first sample.
fn update_average(metrics: &mut ScraperMetrics, sample_ms: f64) {
    let alpha = 0.1;
    metrics.avg_response_time_ms = if metrics.total_requests == 1 {
        sample_ms
    } else {
        metrics.avg_response_time_ms * (1.0 - alpha) + sample_ms * alpha
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_metrics_collector_basic() {
        let collector = MetricsCollector::new();
        let tracker = collector.record_request_start();

        std::thread::sleep(Duration::from_millis(10));

        tracker.succeed(512);
        let metrics = collector.get_metrics();

        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.successful_requests, 1);
        assert_eq!(metrics.failed_requests, 0);
        assert_eq!(metrics.bytes_received, 512);
        assert!(metrics.avg_response_time_ms > 0.0);
    }

    #[test]
    fn test_metrics_collector_failed_request() {
        let collector = MetricsCollector::new();
        collector.record_request_start().fail("HTTP 503".to_string());

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.successful_requests, 0);
        assert_eq!(metrics.failed_requests, 1);
        assert_eq!(metrics.last_error, Some("HTTP 503".to_string()));
        assert!(metrics.last_error_time.is_some());
    }

    #[test]
    fn test_clones_share_counters() {
        let collector = MetricsCollector::new();
        let handle = collector.clone();

        for i in 0..5 {
            let tracker = handle.record_request_start();
            if i % 2 == 0 {
                tracker.succeed(10);
            } else {
                tracker.fail(format!("error {}", i));
            }
        }

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_requests, 5);
        assert_eq!(metrics.successful_requests, 3);
        assert_eq!(metrics.failed_requests, 2);
        assert_eq!(metrics.bytes_received, 30);
        assert_eq!(metrics.last_error, Some("error 3".to_string()));
    }
}
