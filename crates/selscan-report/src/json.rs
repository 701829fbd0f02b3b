use selscan_core::report::Report;

/// Format a selector report as JSON. The empty report comes out as the
/// literal `{}` in both modes.
pub fn format_report(report: &Report, compact: bool) -> String {
    if compact {
        serde_json::to_string(report).expect("Report should be serializable")
    } else {
        serde_json::to_string_pretty(report).expect("Report should be serializable")
    }
}
