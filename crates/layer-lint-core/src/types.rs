//! Core types for violations and checker results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that fails the gate.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source location of a violation.
///
/// The file is always relative to the source root so the printed form is
/// stable across machines. Line 0 is reserved for findings with no single
/// source line: file-level failures (unreadable file, syntax error) and
/// directory-level findings (missing layer directories, oversized
/// contracts directories).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the source root.
    pub file: PathBuf,
    /// Line number (1-indexed; 0 for file- and directory-level findings).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// A finding produced by a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code, e.g. `LL301`.
    pub code: String,
    /// Rule category tag, e.g. `control-flow`.
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Where the violation was found.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.location.file.display(),
            self.location.line,
            self.message
        )
    }
}

/// Converts a [`Violation`] into a miette diagnostic for rich rendering.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: Some(format!("rule: {}", v.rule)),
        }
    }
}

/// Accumulated result of running one checker.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files scanned.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any violation was recorded, regardless of severity.
    ///
    /// The gate fails a checker on any finding; severity only shapes the
    /// report.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Sorts violations by (file, line) for deterministic output.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
        });
    }

    /// Merges another result into this one.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

/// Outcome of a single checker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckerStatus {
    /// The checker scanned files and found nothing.
    Pass,
    /// The checker recorded at least one violation.
    Fail,
    /// No file matched the checker's pattern.
    Skip,
}

impl CheckerStatus {
    /// Greppable status prefix, e.g. `[PASS]`.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Pass => "[PASS]",
            Self::Fail => "[FAIL]",
            Self::Skip => "[SKIP]",
        }
    }
}

/// Buffered output of one checker, collected by the orchestrator.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckerReport {
    /// Display name of the checker.
    pub checker: String,
    /// Pass / fail / skip outcome.
    pub status: CheckerStatus,
    /// Violations and file counts.
    pub result: LintResult,
}

impl CheckerReport {
    /// Builds a report from a finished result.
    #[must_use]
    pub fn new(checker: impl Into<String>, result: LintResult) -> Self {
        let status = if result.files_checked == 0 {
            CheckerStatus::Skip
        } else if result.has_violations() {
            CheckerStatus::Fail
        } else {
            CheckerStatus::Pass
        };
        Self {
            checker: checker.into(),
            status,
            result,
        }
    }

    /// The `[PASS] name` status line.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status.prefix(), self.checker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(line: usize, file: &str) -> Violation {
        Violation::new(
            "LL301",
            "control-flow",
            Severity::Error,
            Location::new(file, line),
            "if statement is not allowed here",
        )
    }

    #[test]
    fn display_matches_contract_format() {
        let v = make_violation(12, "modules/billing/_05_impls/impl_billing.py");
        assert_eq!(
            v.to_string(),
            "modules/billing/_05_impls/impl_billing.py:12: if statement is not allowed here"
        );
    }

    #[test]
    fn sort_is_stable_by_file_then_line() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(9, "b.py"));
        result.violations.push(make_violation(3, "a.py"));
        result.violations.push(make_violation(1, "b.py"));
        result.sort();
        let lines: Vec<(String, usize)> = result
            .violations
            .iter()
            .map(|v| (v.location.file.display().to_string(), v.location.line))
            .collect();
        assert_eq!(
            lines,
            vec![
                ("a.py".to_owned(), 3),
                ("b.py".to_owned(), 1),
                ("b.py".to_owned(), 9)
            ]
        );
    }

    #[test]
    fn report_status_reflects_result() {
        let clean = CheckerReport::new("impl", LintResult {
            violations: vec![],
            files_checked: 2,
        });
        assert_eq!(clean.status, CheckerStatus::Pass);
        assert_eq!(clean.status_line(), "[PASS] impl");

        let mut failing = LintResult::new();
        failing.files_checked = 1;
        failing.violations.push(make_violation(1, "x.py"));
        assert_eq!(CheckerReport::new("impl", failing).status, CheckerStatus::Fail);

        let skipped = CheckerReport::new("router", LintResult::new());
        assert_eq!(skipped.status, CheckerStatus::Skip);
    }
}
