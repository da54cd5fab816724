//! Output formatting module
//!
//! Renders reports (title, headers, rows) and raw documents as a table,
//! a JSON document or an XML document. The mode is fixed for the process.

mod json;
mod table;
mod xml;

use serde_json::Value;

pub use self::json::{render_document_json, render_report_json};
pub use self::table::render_report_table;
pub use self::xml::{escape_xml, render_document_xml, render_report_xml};

/// Output mode selected by --json / --xml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human readable table (default)
    #[default]
    Table,
    /// JSON document
    Json,
    /// XML document
    Xml,
}

impl OutputMode {
    /// Pick the mode from the global flags
    pub fn from_flags(json: bool, xml: bool) -> Self {
        if json {
            OutputMode::Json
        } else if xml {
            OutputMode::Xml
        } else {
            OutputMode::Table
        }
    }

    /// Whether the output is meant for machines
    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputMode::Table)
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Table => write!(f, "table"),
            OutputMode::Json => write!(f, "json"),
            OutputMode::Xml => write!(f, "xml"),
        }
    }
}

/// A titled table of heterogeneous scalar cells
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Report {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Sort rows ascending (case-sensitive) by the first column; later
    /// columns break ties.
    pub fn sorted(mut self) -> Self {
        self.rows.sort_by(|a, b| {
            let left: Vec<String> = a.iter().map(cell_text).collect();
            let right: Vec<String> = b.iter().map(cell_text).collect();
            left.cmp(&right)
        });
        self
    }
}

/// Display text of a cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Selection marker used in listings
pub fn selected_marker(selected: bool) -> Value {
    Value::from(if selected { "*" } else { " " })
}

/// Writes reports, documents and messages in the selected mode
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Render a report to a string
    pub fn render_report(&self, report: &Report) -> String {
        match self.mode {
            OutputMode::Table => render_report_table(report),
            OutputMode::Json => render_report_json(report),
            OutputMode::Xml => render_report_xml(report),
        }
    }

    /// Render a raw document to a string
    pub fn render_document(&self, title: &str, document: &Value) -> String {
        match self.mode {
            OutputMode::Table => format!(
                "{}\n{}",
                title,
                serde_json::to_string_pretty(document).unwrap_or_default()
            ),
            OutputMode::Json => render_document_json(document),
            OutputMode::Xml => render_document_xml(title, document),
        }
    }

    pub fn report(&self, report: &Report) {
        println!("{}", self.render_report(report));
    }

    pub fn document(&self, title: &str, document: &Value) {
        println!("{}", self.render_document(title, document));
    }

    /// Informational message; kept off stdout in structured modes
    pub fn message(&self, message: &str) {
        if self.mode.is_structured() {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}
