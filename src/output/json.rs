//! JSON output formatter

use serde_json::{json, Map, Value};

use super::Report;

/// Render a report as `{ "title": ..., "rows": [ {header: value} ] }`
pub fn render_report_json(report: &Report) -> String {
    let rows: Vec<Value> = report
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (header, value) in report.headers.iter().zip(row.iter()) {
                object.insert(header.clone(), value.clone());
            }
            Value::Object(object)
        })
        .collect();

    let document = json!({
        "title": report.title,
        "rows": rows,
    });
    render_document_json(&document)
}

/// Render a raw document as pretty JSON
pub fn render_document_json(document: &Value) -> String {
    match serde_json::to_string_pretty(document) {
        Ok(json) => json,
        Err(e) => format!("{{\"error\": \"Error serializing to JSON: {}\"}}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rows_keyed_by_header() {
        let mut report = Report::new("Available orgs:", &["Org", "Selected"]);
        report.push_row(vec![json!("org-a"), json!("*")]);

        let parsed: Value = serde_json::from_str(&render_report_json(&report)).unwrap();
        assert_eq!(parsed["title"], "Available orgs:");
        assert_eq!(parsed["rows"][0]["Org"], "org-a");
        assert_eq!(parsed["rows"][0]["Selected"], "*");
    }

    #[test]
    fn test_report_empty_rows() {
        let report = Report::new("Empty:", &["Org"]);
        let parsed: Value = serde_json::from_str(&render_report_json(&report)).unwrap();
        assert!(parsed["rows"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_document_is_pretty() {
        let text = render_document_json(&json!({"a": 1}));
        assert!(text.contains('\n'));
    }
}
