//! The gate: runs every checker in order and stops on the first failure.
//!
//! Checkers run in-process over a shared file list and contract index.
//! Each checker's output is buffered into a [`CheckerReport`]; nothing is
//! printed until the run is decided, so a failing checker's violations
//! always appear as one uninterrupted block.

use std::path::Path;

use layer_lint_checkers::{all_checkers, build_contract_index, discover_python_files, CheckerError};
use layer_lint_core::{CheckerReport, CheckerStatus};
use serde::Serialize;

/// Outcome of one gate run.
#[derive(Debug, Serialize)]
pub struct GateRun {
    /// Reports for the checkers that ran, in gate order. When a checker
    /// fails it is the last entry; the rest never ran.
    pub reports: Vec<CheckerReport>,
    /// Number of Python files discovered under the target.
    pub files_discovered: usize,
}

impl GateRun {
    /// Whether the gate stopped on a failing checker.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.reports
            .last()
            .is_some_and(|r| r.status == CheckerStatus::Fail)
    }
}

/// Runs the full checker sequence against `target`.
///
/// The contract index and the file list are computed once and shared. The
/// sequence stops at the first checker that records a violation.
///
/// # Errors
///
/// Returns [`CheckerError`] when the target path cannot be accessed.
pub fn run_gate(target: &Path) -> Result<GateRun, CheckerError> {
    let contracts = build_contract_index(target);
    let files = discover_python_files(target)?;
    tracing::info!(
        "gate: {} files, {} interfaces indexed",
        files.len(),
        contracts.len()
    );

    let mut reports = Vec::new();
    for checker in all_checkers() {
        let report = checker.report(&files, &contracts)?;
        tracing::debug!("{}", report.status_line());
        let failed = report.status == CheckerStatus::Fail;
        reports.push(report);
        if failed {
            break;
        }
    }

    Ok(GateRun {
        reports,
        files_discovered: files.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    #[test]
    fn gate_stops_at_the_first_failing_checker() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Module with a single layer directory: the structure checker
        // (first in the sequence) fails and nothing after it runs.
        write(
            dir.path(),
            "src/modules/shop/_05_impls/impl_shop.py",
            "class ImplShop(IShop):\n    pass\n",
        );

        let gate = run_gate(dir.path()).expect("gate run");
        assert!(gate.failed());
        assert_eq!(gate.reports.len(), 1);
        assert_eq!(gate.reports[0].checker, "structure");
    }

    #[test]
    fn clean_target_runs_every_checker() {
        let dir = tempfile::tempdir().expect("tempdir");
        for layer in [
            "_01_contracts",
            "_02_dtos",
            "_03_abstracts",
            "_04_models",
            "_05_impls",
            "_06_services",
            "_07_router",
        ] {
            std::fs::create_dir_all(dir.path().join("src/modules/shop").join(layer))
                .expect("mkdir");
        }
        write(
            dir.path(),
            "src/modules/shop/_01_contracts/i_shop.py",
            "from abc import ABC, abstractmethod\n\n\nclass IShop(ABC):\n    @abstractmethod\n    def checkout(self, user_id: str) -> bool:\n        ...\n",
        );

        let gate = run_gate(dir.path()).expect("gate run");
        assert!(!gate.failed());
        assert_eq!(gate.reports.len(), 15);
        assert!(gate
            .reports
            .iter()
            .all(|r| r.status != CheckerStatus::Fail));
    }

    #[test]
    fn missing_target_is_an_error() {
        assert!(run_gate(Path::new("/nonexistent/target/path")).is_err());
    }
}
