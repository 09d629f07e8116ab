use indexmap::IndexMap;

use crate::record::{RawRecord, RequestRecord};
use crate::stats::{EndpointStats, nearest_rank, percentage};

/// Aggregate metrics for one load-test run.
///
/// Endpoints iterate in the order their label was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadMetrics {
    pub total_requests: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub error_percentage: f64,
    pub avg_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    pub median_response_time: f64,
    pub p95_response_time: f64,
    pub p99_response_time: f64,
    pub total_bytes: u64,
    pub endpoints: IndexMap<String, EndpointStats>,

    /// Records rejected because a numeric field did not parse.
    pub skipped_records: u64,
}

impl LoadMetrics {
    pub fn is_empty(&self) -> bool {
        self.total_requests == 0
    }

    pub fn success_percentage(&self) -> f64 {
        percentage(self.success_count, self.total_requests)
    }
}

/// Single-pass accumulator. Push records in file order, then `finish`.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    elapsed: Vec<f64>,
    success_count: u64,
    error_count: u64,
    total_bytes: u64,
    endpoints: IndexMap<String, EndpointStats>,
    skipped: u64,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &RequestRecord) {
        self.elapsed.push(record.elapsed);
        if record.success {
            self.success_count = self.success_count.saturating_add(1);
        } else {
            self.error_count = self.error_count.saturating_add(1);
        }
        self.total_bytes = self.total_bytes.saturating_add(record.bytes);

        // Avoid allocating the key for labels we've already seen.
        match self.endpoints.get_mut(record.label.as_str()) {
            Some(stats) => stats.push(record.elapsed, record.success),
            None => {
                let mut stats = EndpointStats::default();
                stats.push(record.elapsed, record.success);
                self.endpoints.insert(record.label.clone(), stats);
            }
        }
    }

    /// Parses and pushes a raw row. Rows with a malformed numeric field are
    /// counted as skipped and contribute to nothing else.
    pub fn push_raw(&mut self, raw: &RawRecord) {
        match RequestRecord::parse(raw) {
            Ok(record) => self.push(&record),
            Err(err) => {
                self.skipped = self.skipped.saturating_add(1);
                tracing::debug!(error = %err, "skipping malformed result record");
            }
        }
    }

    pub fn finish(self) -> LoadMetrics {
        let Self {
            mut elapsed,
            success_count,
            error_count,
            total_bytes,
            endpoints,
            skipped,
        } = self;

        elapsed.sort_by(f64::total_cmp);

        let total_requests = elapsed.len() as u64;
        let avg_response_time = if elapsed.is_empty() {
            0.0
        } else {
            elapsed.iter().sum::<f64>() / elapsed.len() as f64
        };

        LoadMetrics {
            total_requests,
            success_count,
            error_count,
            error_percentage: percentage(error_count, total_requests),
            avg_response_time,
            min_response_time: elapsed.first().copied().unwrap_or_default(),
            max_response_time: elapsed.last().copied().unwrap_or_default(),
            median_response_time: nearest_rank(&elapsed, 0.5),
            p95_response_time: nearest_rank(&elapsed, 0.95),
            p99_response_time: nearest_rank(&elapsed, 0.99),
            total_bytes,
            endpoints,
            skipped_records: skipped,
        }
    }
}

pub fn calculate_metrics<'a>(records: impl IntoIterator<Item = &'a RawRecord>) -> LoadMetrics {
    let mut agg = MetricsAggregator::new();
    for raw in records {
        agg.push_raw(raw);
    }
    agg.finish()
}
