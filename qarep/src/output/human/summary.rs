use std::fmt::Write as _;

use super::super::LoadTestSummary;
use super::format::{format_bytes, format_ms, format_pct};

pub(crate) fn render(summary: &LoadTestSummary<'_>) -> String {
    let m = summary.metrics;
    let mut out = String::new();

    out.push_str("summary\n");
    writeln!(&mut out, "  requests: {}", m.total_requests).ok();
    writeln!(&mut out, "  successful: {}", m.success_count).ok();
    writeln!(
        &mut out,
        "  errors: {} ({})",
        m.error_count,
        format_pct(m.error_percentage)
    )
    .ok();
    if m.skipped_records > 0 {
        writeln!(&mut out, "  skipped_records: {}", m.skipped_records).ok();
    }
    writeln!(&mut out, "  bytes: {}", format_bytes(m.total_bytes)).ok();
    writeln!(
        &mut out,
        "  latency: avg={} min={} p50={} p95={} p99={} max={}",
        format_ms(m.avg_response_time),
        format_ms(m.min_response_time),
        format_ms(m.median_response_time),
        format_ms(m.p95_response_time),
        format_ms(m.p99_response_time),
        format_ms(m.max_response_time),
    )
    .ok();

    if !m.endpoints.is_empty() {
        out.push_str("\nendpoints\n");
        for (label, s) in &m.endpoints {
            writeln!(&mut out, "  {label}:").ok();
            writeln!(
                &mut out,
                "    requests: {} avg={} errors={}",
                s.count,
                format_ms(s.avg_time()),
                format_pct(s.error_percentage())
            )
            .ok();
        }
    }

    match summary.warnings {
        Some([]) => out.push_str("\nAll metrics are within thresholds\n"),
        Some(warnings) => {
            out.push_str("\nthreshold warnings\n");
            for w in warnings {
                writeln!(&mut out, "  ! {w}").ok();
            }
        }
        None => {}
    }

    writeln!(&mut out, "\nreport: {}", summary.report.display()).ok();
    out
}
