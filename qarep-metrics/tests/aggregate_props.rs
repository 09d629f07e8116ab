use proptest::prelude::*;

use qarep_metrics::{RawRecord, calculate_metrics};

fn record_strategy() -> impl Strategy<Value = (String, String, bool, u32)> {
    (
        prop::sample::select(vec!["GET /", "POST /login", "GET /stocks"]),
        prop_oneof![
            8 => (0u32..20_000).prop_map(|v| format!("{v}")),
            1 => Just("not-a-number".to_string()),
        ],
        any::<bool>(),
        0u32..100_000,
    )
        .prop_map(|(label, elapsed, success, bytes)| (label.to_string(), elapsed, success, bytes))
}

fn to_raw(rows: &[(String, String, bool, u32)]) -> Vec<RawRecord> {
    rows.iter()
        .map(|(label, elapsed, success, bytes)| {
            let success = if *success { "true" } else { "false" };
            let bytes = bytes.to_string();
            RawRecord::from_pairs([
                ("label", label.as_str()),
                ("elapsed", elapsed.as_str()),
                ("success", success),
                ("bytes", bytes.as_str()),
            ])
        })
        .collect()
}

proptest! {
    #[test]
    fn success_and_errors_partition_total(rows in prop::collection::vec(record_strategy(), 0..200)) {
        let m = calculate_metrics(&to_raw(&rows));
        prop_assert_eq!(m.success_count + m.error_count, m.total_requests);
        prop_assert_eq!(m.total_requests + m.skipped_records, rows.len() as u64);

        let per_endpoint: u64 = m.endpoints.values().map(|e| e.count).sum();
        prop_assert_eq!(per_endpoint, m.total_requests);
    }

    #[test]
    fn order_statistics_are_monotonic(rows in prop::collection::vec(record_strategy(), 0..200)) {
        let m = calculate_metrics(&to_raw(&rows));
        prop_assert!(m.min_response_time <= m.median_response_time);
        prop_assert!(m.median_response_time <= m.p95_response_time);
        prop_assert!(m.p95_response_time <= m.p99_response_time);
        prop_assert!(m.p99_response_time <= m.max_response_time);

        if !m.is_empty() {
            prop_assert!(m.min_response_time <= m.avg_response_time);
            prop_assert!(m.avg_response_time <= m.max_response_time);
        }
    }

    #[test]
    fn endpoint_extremes_bound_endpoint_average(rows in prop::collection::vec(record_strategy(), 1..100)) {
        let m = calculate_metrics(&to_raw(&rows));
        for stats in m.endpoints.values() {
            prop_assert!(stats.min_time <= stats.avg_time() + 1e-9);
            prop_assert!(stats.avg_time() <= stats.max_time + 1e-9);
            prop_assert!(stats.max_time <= m.max_response_time);
        }
    }
}
