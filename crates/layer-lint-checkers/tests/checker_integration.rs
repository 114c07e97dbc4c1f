//! Integration tests: full checker runs over temporary project trees.
//!
//! Each test lays out a small `src/modules/...` tree, builds the contract
//! index the way the gate does, and runs one checker (or all of them)
//! end-to-end through discovery, parsing, and the priority pipeline.

use std::path::{Path, PathBuf};

use layer_lint_checkers::checkers::{
    all_checkers, comments_checker, dataclass_checker, impl_checker, interface_checker,
    model_checker,
};
use layer_lint_checkers::{build_contract_index, discover_python_files};
use layer_lint_core::{CheckerStatus, ContractIndex};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(path, content).expect("write");
}

fn layer_dirs(root: &Path, module: &str) {
    for dir in [
        "_01_contracts",
        "_02_dtos",
        "_03_abstracts",
        "_04_models",
        "_05_impls",
        "_06_services",
        "_07_router",
    ] {
        std::fs::create_dir_all(root.join(format!("src/modules/{module}/{dir}"))).expect("mkdir");
    }
}

const CONTRACT_I_LOG: &str = "\
from abc import ABC, abstractmethod


class ILog(ABC):
    @abstractmethod
    def write(self, line: str) -> None:
        ...

    @abstractmethod
    def flush(self) -> None:
        ...
";

const CLEAN_IMPL_LOG: &str = "\
from typing import override

from modules.logbook._01_contracts.i_log import ILog


class ImplLog(ILog):
    def __init__(self, repo_log: IRepoLog) -> None:
        self.repo_log = repo_log

    @override
    def write(self, line: str) -> None:
        self.repo_log.append(line)

    @override
    def flush(self) -> None:
        self.repo_log.sync()
";

#[test]
fn conforming_module_passes_every_checker() {
    let dir = tempfile::tempdir().expect("tempdir");
    layer_dirs(dir.path(), "logbook");
    write(
        dir.path(),
        "src/modules/logbook/_01_contracts/i_log.py",
        CONTRACT_I_LOG,
    );
    write(
        dir.path(),
        "src/modules/logbook/_05_impls/impl_log.py",
        CLEAN_IMPL_LOG,
    );

    let contracts = build_contract_index(dir.path());
    let files = discover_python_files(dir.path()).expect("discover");
    for checker in all_checkers() {
        let report = checker.report(&files, &contracts).expect("report");
        assert_ne!(
            report.status,
            CheckerStatus::Fail,
            "checker `{}` failed on a conforming module: {:#?}",
            checker.name(),
            report.result.violations
        );
    }
}

#[test]
fn missing_override_is_the_only_finding() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "src/modules/logbook/_01_contracts/i_log.py",
        CONTRACT_I_LOG,
    );
    // Same as the clean implementation, but `flush` lost its decorator.
    write(
        dir.path(),
        "src/modules/logbook/_05_impls/impl_log.py",
        "\
from typing import override

from modules.logbook._01_contracts.i_log import ILog


class ImplLog(ILog):
    def __init__(self, repo_log: IRepoLog) -> None:
        self.repo_log = repo_log

    @override
    def write(self, line: str) -> None:
        self.repo_log.append(line)

    def flush(self) -> None:
        self.repo_log.sync()
",
    );

    let contracts = build_contract_index(dir.path());
    let result = impl_checker()
        .run(dir.path(), &contracts)
        .expect("run failed");
    assert_eq!(result.violations.len(), 1, "{:#?}", result.violations);
    assert!(result.violations[0]
        .message
        .contains("`flush` must be decorated with @override"));
}

#[test]
fn control_flow_gates_defensive_findings_in_the_same_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    // One function with both an `if` and an `or` fallback: only the
    // higher-priority control-flow group may report.
    write(
        dir.path(),
        "src/modules/shop/_05_impls/impl_choose.py",
        "\
from typing import override


class ImplChoose(IChoose):
    @override
    def pick(self, value: int) -> int:
        if value > 0:
            return value
        return value or 0
",
    );

    let result = impl_checker()
        .run(dir.path(), &ContractIndex::new())
        .expect("run failed");
    assert!(
        result
            .violations
            .iter()
            .any(|v| v.message.contains("if statements are not allowed")),
        "{:#?}",
        result.violations
    );
    assert!(
        !result.violations.iter().any(|v| v.code == "LL401"),
        "gated or-fallback finding leaked through: {:#?}",
        result.violations
    );
}

#[test]
fn oversized_interface_reports_the_method_budget() {
    let dir = tempfile::tempdir().expect("tempdir");
    let methods: String = (0..8)
        .map(|i| format!("    def method_{i}(self) -> None:\n        ...\n\n"))
        .collect();
    write(
        dir.path(),
        "src/modules/shop/_01_contracts/i_mega.py",
        &format!("class IMega:\n{methods}"),
    );

    let contracts = build_contract_index(dir.path());
    let result = interface_checker()
        .run(dir.path(), &contracts)
        .expect("run failed");
    assert_eq!(result.violations.len(), 1, "{:#?}", result.violations);
    assert!(result.violations[0].message.ends_with("must be ≤ 7"));
}

#[test]
fn model_importing_impls_is_a_layer_escape() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "src/modules/shop/_04_models/model_user.py",
        "\
from modules.shop._05_impls.impl_user import ImplUser


class ModelUser:
    pass
",
    );

    let result = model_checker()
        .run(dir.path(), &ContractIndex::new())
        .expect("run failed");
    assert_eq!(result.violations.len(), 1, "{:#?}", result.violations);
    let violation = &result.violations[0];
    assert_eq!(violation.message, "models should not depend on impls");
    assert_eq!(
        violation.to_string(),
        "modules/shop/_04_models/model_user.py:1: models should not depend on impls"
    );
}

#[test]
fn keyed_records_with_shared_fields_are_duplicates() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "src/modules/logbook/_01_contracts/d_log.py",
        "\
from dataclasses import dataclass


@dataclass(frozen=True)
class DLogRecord:
    log_id: str
    message: str
    level: str


@dataclass(frozen=True)
class DLogEntry:
    log_id: str
    message: str
    level: str
",
    );

    let result = dataclass_checker()
        .run(dir.path(), &ContractIndex::new())
        .expect("run failed");
    assert_eq!(result.violations.len(), 1, "{:#?}", result.violations);
    let message = &result.violations[0].message;
    assert!(message.contains("`DLogRecord`"));
    assert!(message.contains("`DLogEntry`"));
    assert!(message.contains("unify them into one record"));
}

#[test]
fn rambling_docstring_reports_length_and_sentence_count_together() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "src/modules/shop/_05_impls/impl_render.py",
        "\
class ImplRender(IRender):
    def render(self, canvas: Canvas) -> None:
        \"\"\"Builds the canvas frame. It walks the widget tree twice. The second pass applies the damage regions accumulated in the first.\"\"\"
        self.surface.blit(canvas)
",
    );

    let result = comments_checker()
        .run(dir.path(), &ContractIndex::new())
        .expect("run failed");
    assert_eq!(result.violations.len(), 2, "{:#?}", result.violations);
    // Both findings land on the `def render` line, not on the docstring.
    assert_eq!(result.violations[0].location.line, 2);
    assert_eq!(result.violations[1].location.line, 2);
    let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
    assert!(codes.contains(&"LLG01"));
    assert!(codes.contains(&"LLG02"));
}

#[test]
fn empty_layer_skips_and_missing_layers_fail_structure() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Only the contracts directory exists; the structure checker must
    // demand the other six, and the DTO checker has nothing to scan.
    write(
        dir.path(),
        "src/modules/logbook/_01_contracts/i_log.py",
        CONTRACT_I_LOG,
    );

    let contracts = build_contract_index(dir.path());
    let files: Vec<PathBuf> = discover_python_files(dir.path()).expect("discover");

    let mut saw_structure_failure = false;
    for checker in all_checkers() {
        let report = checker.report(&files, &contracts).expect("report");
        match checker.name() {
            "structure" => {
                assert_eq!(report.status, CheckerStatus::Fail);
                assert_eq!(report.result.violations[0].location.line, 0);
                assert!(report.result.violations[0]
                    .message
                    .contains("missing layer directories"));
                saw_structure_failure = true;
            }
            "dto" => assert_eq!(report.status, CheckerStatus::Skip),
            _ => {}
        }
    }
    assert!(saw_structure_failure);
}
