//! XML output formatter

use serde_json::Value;

use super::{cell_text, Report};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Escape text for XML element content and attribute values
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Turn an arbitrary key into a valid element name
fn element_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    {
        name.insert(0, '_');
    }
    name
}

/// Render a report as `<report title=".."><row><field name="..">..</field></row></report>`
pub fn render_report_xml(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(DECLARATION);
    out.push('\n');
    out.push_str(&format!("<report title=\"{}\">\n", escape_xml(&report.title)));
    for row in &report.rows {
        out.push_str("  <row>\n");
        for (header, value) in report.headers.iter().zip(row.iter()) {
            out.push_str(&format!(
                "    <field name=\"{}\">{}</field>\n",
                escape_xml(header),
                escape_xml(&cell_text(value))
            ));
        }
        out.push_str("  </row>\n");
    }
    out.push_str("</report>");
    out
}

fn write_value(out: &mut String, name: &str, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    let tag = element_name(name);
    match value {
        Value::Object(map) => {
            out.push_str(&format!("{}<{}>\n", indent, tag));
            for (key, child) in map {
                write_value(out, key, child, depth + 1);
            }
            out.push_str(&format!("{}</{}>\n", indent, tag));
        }
        Value::Array(items) => {
            out.push_str(&format!("{}<{}>\n", indent, tag));
            for item in items {
                write_value(out, "item", item, depth + 1);
            }
            out.push_str(&format!("{}</{}>\n", indent, tag));
        }
        Value::Null => out.push_str(&format!("{}<{}/>\n", indent, tag)),
        scalar => out.push_str(&format!(
            "{}<{}>{}</{}>\n",
            indent,
            tag,
            escape_xml(&cell_text(scalar)),
            tag
        )),
    }
}

/// Render a raw document as nested XML elements under `<document>`
pub fn render_document_xml(title: &str, document: &Value) -> String {
    let mut out = String::new();
    out.push_str(DECLARATION);
    out.push('\n');
    out.push_str(&format!("<document title=\"{}\">\n", escape_xml(title)));
    match document {
        Value::Object(map) => {
            for (key, child) in map {
                write_value(&mut out, key, child, 1);
            }
        }
        other => write_value(&mut out, "value", other, 1),
    }
    out.push_str("</document>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_xml_simple() {
        assert_eq!(escape_xml("simple"), "simple");
    }

    #[test]
    fn test_escape_xml_special() {
        assert_eq!(
            escape_xml(r#"a<b>&"c"'d'"#),
            "a&lt;b&gt;&amp;&quot;c&quot;&apos;d&apos;"
        );
    }

    #[test]
    fn test_element_name_sanitized() {
        assert_eq!(element_name("planId"), "planId");
        assert_eq!(element_name("Instance Id"), "Instance_Id");
        assert_eq!(element_name("1st"), "_1st");
    }

    #[test]
    fn test_report_xml() {
        let mut report = Report::new("Orgs in 'i-1':", &["Org", "Selected"]);
        report.push_row(vec![json!("R&D"), json!("*")]);
        let xml = render_report_xml(&report);
        assert!(xml.starts_with(DECLARATION));
        assert!(xml.contains(r#"<report title="Orgs in &apos;i-1&apos;:">"#));
        assert!(xml.contains(r#"<field name="Org">R&amp;D</field>"#));
        assert!(xml.ends_with("</report>"));
    }

    #[test]
    fn test_document_xml_nested() {
        let doc = json!({
            "instance": {"id": "i-1", "region": "us-west-1.vchs.vmware.com"},
            "plan": null,
            "tags": ["a", "b"]
        });
        let xml = render_document_xml("Details", &doc);
        assert!(xml.contains("    <id>i-1</id>"));
        assert!(xml.contains("  <plan/>"));
        assert!(xml.contains("    <item>a</item>"));
    }
}
