pub mod audit;
pub mod markdown_index;
pub mod scan;
pub mod status;
pub mod update;

use crate::inventory::config::InventoryConfig;
use crate::inventory::paths::InventoryPaths;
use serde::Serialize;
use serde_json::Value;

/// Resolved configuration handed to every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub cfg: InventoryConfig,
    pub paths: InventoryPaths,
}

/// A titled list of findings; only non-empty sections are kept.
#[derive(Debug, Clone, Serialize)]
pub struct FindingSection {
    pub key: String,
    pub heading: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub findings: Vec<FindingSection>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            findings: Vec::new(),
            issues: Vec::new(),
            data: None,
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    /// Records a finding section; a non-empty one fails the command.
    pub fn add_findings<I, S>(&mut self, key: &str, heading: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return;
        }
        self.ok = false;
        self.findings.push(FindingSection {
            key: key.to_string(),
            heading: heading.to_string(),
            items,
        });
    }

    pub fn finding_count(&self) -> usize {
        self.findings.iter().map(|s| s.items.len()).sum()
    }

    pub fn exit_code(&self) -> i32 {
        if self.ok { 0 } else { 1 }
    }

    /// One-line outcome used for the event log.
    pub fn summary(&self) -> String {
        if self.ok {
            return self
                .details
                .first()
                .cloned()
                .unwrap_or_else(|| "ok".to_string());
        }
        format!("{} findings, {} issues", self.finding_count(), self.issues.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_findings_keep_report_ok() {
        let mut report = CommandReport::new("audit");
        report.add_findings(
            "missing_files",
            "Catalog references missing files:",
            Vec::<String>::new(),
        );
        assert!(report.ok);
        assert!(report.findings.is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn findings_and_issues_fail_the_report() {
        let mut report = CommandReport::new("audit");
        report.add_findings("duplicates", "Duplicate titles detected:", ["a.md", "b.md"]);
        assert!(!report.ok);
        assert_eq!(report.finding_count(), 2);
        assert_eq!(report.exit_code(), 1);

        let mut report = CommandReport::new("markdown-index");
        report.issue("Catalog is empty; nothing to index.");
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.summary(), "0 findings, 1 issues");
    }
}
