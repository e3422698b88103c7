//! Plain-text run summary.
//!
//! This is the body the external notifier would send; transport stays
//! outside this repository, so the app prints it to stdout.

use monitor_core::ChangeEvent;
use monitor_engine::RunReport;

pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Checked {} manuscripts: {} new, {} changed, {} rows skipped.\n",
        report.harvested,
        report.new_records,
        report.changes.len(),
        report.skipped.total()
    ));
    for source in &report.empty_sources {
        out.push_str(&format!(
            "Warning: {source} returned no records this run.\n"
        ));
    }

    if report.changes.is_empty() {
        out.push_str("No status changes.\n");
        return out;
    }

    out.push_str("\nStatus changes\n==============\n");
    for (index, event) in report.changes.iter().enumerate() {
        out.push_str(&format_event(index + 1, event));
    }
    out
}

fn format_event(number: usize, event: &ChangeEvent) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{number}. {}\n", event.title));
    out.push_str(&format!("   Source: {} ({})\n", event.source, event.id));
    out.push_str(&format!(
        "   Status: {} -> {}\n",
        event.old_status, event.new_status
    ));
    out.push_str(&format!("   Time:   {}\n", event.changed_at));
    if let Some(url) = &event.url {
        out.push_str(&format!("   Link:   {url}\n"));
    }
    out
}
