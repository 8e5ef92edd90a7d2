//! Analysis issues: recoverable errors and warnings with source context.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// One recoverable problem recorded during a run.
///
/// Nothing in the engine is fatal per sheet or row; every failure is
/// converted to an `Issue` and processing continues. The file, sheet,
/// and cell content carry enough context for a user to find the
/// offending cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: IssueSeverity,
    /// File the issue was observed in.
    pub file: String,
    /// Sheet within the file, when known.
    pub sheet: Option<String>,
    /// Human-readable description, including the cell content where useful.
    pub message: String,
}

impl Issue {
    pub fn error(file: impl Into<String>, sheet: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Error, file, sheet, message)
    }

    pub fn warning(
        file: impl Into<String>,
        sheet: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(IssueSeverity::Warning, file, sheet, message)
    }

    pub fn info(file: impl Into<String>, sheet: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Info, file, sheet, message)
    }

    fn new(
        severity: IssueSeverity,
        file: impl Into<String>,
        sheet: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            file: file.into(),
            sheet: sheet.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            IssueSeverity::Error => "ERROR",
            IssueSeverity::Warning => "WARNING",
            IssueSeverity::Info => "INFO",
        };
        match &self.sheet {
            Some(sheet) => write!(f, "[{tag}] {} ({sheet}): {}", self.file, self.message),
            None => write!(f, "[{tag}] {}: {}", self.file, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_sheet_when_present() {
        let issue = Issue::warning("rodzina.csv", Some("Arkusz1"), "missing birth date");
        assert_eq!(
            issue.to_string(),
            "[WARNING] rodzina.csv (Arkusz1): missing birth date"
        );
        let issue = Issue::error("rodzina.csv", None, "cannot parse file");
        assert_eq!(issue.to_string(), "[ERROR] rodzina.csv: cannot parse file");
    }
}
