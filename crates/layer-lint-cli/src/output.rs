//! Output rendering for gate runs.

use anyhow::Result;
use layer_lint_core::{CheckerStatus, ViolationDiagnostic};

use crate::orchestrator::GateRun;
use crate::OutputFormat;

/// Prints a finished gate run in the requested format.
///
/// # Errors
///
/// Fails only when JSON serialization fails.
pub fn print(gate: &GateRun, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(gate)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(gate)?),
        OutputFormat::Rich => print!("{}", render_rich(gate)),
    }
    Ok(())
}

/// Text rendering: one status line per checker; the failing checker's
/// violations come first as an uninterrupted block, then the stop marker.
#[must_use]
pub fn render_text(gate: &GateRun) -> String {
    let mut out = String::new();
    for report in &gate.reports {
        if report.status == CheckerStatus::Fail {
            for violation in &report.result.violations {
                out.push_str(&violation.to_string());
                out.push('\n');
            }
        }
        out.push_str(&report.status_line());
        out.push('\n');
    }
    if gate.failed() {
        out.push_str("[STOP] fix these before continuing\n");
    } else {
        out.push_str(&format!(
            "all checkers passed ({} files checked)\n",
            gate.files_discovered
        ));
    }
    out
}

/// Rich rendering: each violation of the failing checker becomes a miette
/// diagnostic with its location as a header line; status lines are shared
/// with the text format.
#[must_use]
pub fn render_rich(gate: &GateRun) -> String {
    let mut out = String::new();
    for report in &gate.reports {
        if report.status == CheckerStatus::Fail {
            for violation in &report.result.violations {
                out.push_str(&format!(
                    "{}:{}\n",
                    violation.location.file.display(),
                    violation.location.line
                ));
                let diagnostic = miette::Report::new(ViolationDiagnostic::from(violation));
                out.push_str(&format!("{diagnostic:?}"));
            }
        }
        out.push_str(&report.status_line());
        out.push('\n');
    }
    if gate.failed() {
        out.push_str("[STOP] fix these before continuing\n");
    } else {
        out.push_str(&format!(
            "all checkers passed ({} files checked)\n",
            gate.files_discovered
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::run_gate;
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    #[test]
    fn failing_run_renders_violations_then_fail_and_stop() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "src/modules/shop/_05_impls/impl_shop.py",
            "class ImplShop(IShop):\n    pass\n",
        );

        let gate = run_gate(dir.path()).expect("gate run");
        let text = render_text(&gate);
        assert!(text.contains("missing layer directories"));
        assert!(text.contains("[FAIL] structure"));
        assert!(text.ends_with("[STOP] fix these before continuing\n"));
    }

    #[test]
    fn rich_run_keeps_status_and_stop_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "src/modules/shop/_05_impls/impl_shop.py",
            "class ImplShop(IShop):\n    pass\n",
        );

        let gate = run_gate(dir.path()).expect("gate run");
        let rich = render_rich(&gate);
        assert!(rich.contains("[FAIL] structure"));
        assert!(rich.ends_with("[STOP] fix these before continuing\n"));
        // The diagnostic header carries the location in text form.
        assert!(rich.contains("modules/shop/_05_impls/impl_shop.py:0"));
    }

    #[test]
    fn double_run_output_is_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "src/modules/shop/_05_impls/impl_a.py",
            "class ImplA(IA):\n    pass\n",
        );
        write(
            dir.path(),
            "src/modules/shop/_05_impls/impl_b.py",
            "class ImplB(IB):\n    pass\n",
        );

        let first = render_text(&run_gate(dir.path()).expect("gate run"));
        let second = render_text(&run_gate(dir.path()).expect("gate run"));
        assert_eq!(first, second);
    }

    #[test]
    fn clean_run_ends_with_the_summary() {
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
            std::fs::create_dir_all(dir.path().join("src/modules/pay").join(layer))
                .expect("mkdir");
        }
        write(
            dir.path(),
            "src/modules/pay/_01_contracts/i_pay.py",
            "from abc import ABC, abstractmethod\n\n\nclass IPay(ABC):\n    @abstractmethod\n    def charge(self, user_id: str) -> bool:\n        ...\n",
        );

        let gate = run_gate(dir.path()).expect("gate run");
        let text = render_text(&gate);
        assert!(text.contains("[PASS] interface"));
        assert!(text.contains("[SKIP] dto"));
        assert!(text.ends_with("all checkers passed (1 files checked)\n"));
    }
}
