use std::fmt::Write;

use super::summary::BatchSummary;

/// Human-readable rendering of a summary. Presentation only.
pub fn format_report(summary: &BatchSummary) -> String {
    let mut out = String::with_capacity(256 + summary.tasks.len() * 64);

    out.push_str("📊 Execution Results\n");
    let _ = writeln!(out, "  Success: {} files", summary.success_count);
    if summary.failure_count > 0 {
        let _ = writeln!(out, "  Failed: {} files", summary.failure_count);
    }
    let _ = writeln!(out, "  Total time: {}ms", summary.total_duration_ms);
    let _ = writeln!(out, "  Average: {}ms/file", summary.average_duration_ms);
    out.push('\n');

    for task in &summary.tasks {
        let icon = if task.success { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "  {} {} -> {} ({}ms)",
            icon, task.name, task.destination, task.duration_ms
        );
        if let Some(error) = &task.error {
            let _ = writeln!(out, "      Error: {}", error);
        }
    }

    out
}
