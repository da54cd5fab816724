//! Table output formatter

use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use super::{cell_text, Report};

/// Render a report as a titled table
pub fn render_report_table(report: &Report) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(report.headers.clone());

    for row in &report.rows {
        table.add_row(row.iter().map(cell_text).collect::<Vec<_>>());
    }

    format!("{}\n{}", report.title, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_empty() {
        let report = Report::new("Nothing here:", &["Key", "Value"]);
        let text = render_report_table(&report);
        assert!(text.starts_with("Nothing here:"));
        assert!(text.contains("Key"));
    }

    #[test]
    fn test_table_with_data() {
        let mut report = Report::new("Status:", &["Key", "Value"]);
        report.push_row(vec![json!("profile"), json!("default")]);
        report.push_row(vec![json!("active session"), json!(true)]);
        let text = render_report_table(&report);
        assert!(text.contains("default"));
        assert!(text.contains("true"));
    }
}
