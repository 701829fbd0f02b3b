use colored::Colorize;

use selscan_core::diagnostics::Warning;
use selscan_core::report::{Report, SimpleSelectorView};

/// Format a selector report for terminal output.
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "selscan - Selector Inventory".bold()));
    out.push_str(&format!("{}\n", "=".repeat(40)));

    if report.is_empty() {
        out.push_str(&format!("\n{}\n", "No selectors found.".yellow().bold()));
        return out;
    }

    if let Some(ref selectors) = report.selectors {
        out.push_str(&format_section("Selectors", selectors));
    }

    match report.simple_selectors {
        Some(SimpleSelectorView::Buckets(ref buckets)) => {
            out.push_str(&format_section("Simple selectors", &buckets.all));
            out.push_str(&format_section("Ids", &buckets.ids));
            out.push_str(&format_section("Classes", &buckets.classes));
            out.push_str(&format_section("Attributes", &buckets.attributes));
            out.push_str(&format_section("Types", &buckets.types));
        }
        Some(SimpleSelectorView::All(ref all)) => {
            out.push_str(&format_section("Simple selectors", all));
        }
        None => {}
    }

    if let Some(ref ids) = report.ids {
        out.push_str(&format_section("Ids", ids));
    }
    if let Some(ref classes) = report.classes {
        out.push_str(&format_section("Classes", classes));
    }
    if let Some(ref attributes) = report.attributes {
        out.push_str(&format_section("Attributes", attributes));
    }
    if let Some(ref types) = report.types {
        out.push_str(&format_section("Types", types));
    }

    out.push('\n');
    out
}

fn format_section(title: &str, items: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} ({})\n{}\n",
        title.bold(),
        items.len(),
        "-".repeat(40)
    ));
    if items.is_empty() {
        out.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for item in items {
        out.push_str(&format!("  {item}\n"));
    }
    out
}

/// Format advisory warnings for stderr display.
pub fn format_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("{} {}\n", "Warning:".yellow().bold(), w.message))
        .collect()
}
