//! Run narrative log
//!
//! The audit trail shown to the end user. Entries accumulate in an explicit
//! ordered list as the pipeline progresses and are rendered to HTML by the
//! caller once the run finishes; nothing is written to a shared resource
//! mid-computation.

use std::fmt::Write as _;

/// One entry of the run narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Top-level heading (`<h3>`)
    Heading(String),
    /// Section heading (`<h4>`)
    SubHeading(String),
    /// Narrative line (`<p>`)
    Paragraph(String),
}

/// Append-only ordered list of narrative entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    /// Empty narrative.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a top-level heading.
    pub fn heading(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Heading(text.into()));
    }

    /// Append a section heading.
    pub fn subheading(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::SubHeading(text.into()));
    }

    /// Append a narrative line.
    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Paragraph(text.into()));
    }

    /// The accumulated entries, in append order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Render the narrative as the warehouse info.html fragment, one element
    /// per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            let (tag, text) = match entry {
                LogEntry::Heading(text) => ("h3", text),
                LogEntry::SubHeading(text) => ("h4", text),
                LogEntry::Paragraph(text) => ("p", text),
            };
            let _ = writeln!(html, "<{tag}>{text}</{tag}>");
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_append_order() {
        let mut log = RunLog::new();
        log.heading("Model Execution Summary");
        log.paragraph("first");
        log.subheading("Section");
        log.paragraph("second");
        assert_eq!(log.entries().len(), 4);
        assert_eq!(
            log.entries()[0],
            LogEntry::Heading("Model Execution Summary".to_string())
        );
    }

    #[test]
    fn renders_one_element_per_line() {
        let mut log = RunLog::new();
        log.heading("Title");
        log.subheading("ERROR");
        log.paragraph("something happened");
        assert_eq!(
            log.to_html(),
            "<h3>Title</h3>\n<h4>ERROR</h4>\n<p>something happened</p>\n"
        );
    }
}
