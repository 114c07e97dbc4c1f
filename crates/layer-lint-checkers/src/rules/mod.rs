//! Rule families.
//!
//! One module per family. Rules are plain structs implementing
//! [`layer_lint_core::FileRule`] or [`layer_lint_core::ClassRule`]; checkers
//! compose them into priority groups.

pub mod comments;
pub mod conformance;
pub mod control_flow;
pub mod dataclass;
pub mod defensive;
pub mod fields;
pub mod functions;
pub mod imports;
pub mod instantiation;
pub mod interface;
pub mod layer_deps;
pub mod members;
pub mod model_sync;
pub mod naming;
pub mod overrides;
pub mod signatures;
pub mod structure;

use layer_lint_core::{CheckContext, Location, Severity, Violation};
use layer_lint_py::{PyFunction, PyModule};

/// Builds a violation located in the current file.
pub(crate) fn violation(
    ctx: &CheckContext<'_>,
    code: &'static str,
    rule: &'static str,
    line: usize,
    message: impl Into<String>,
) -> Violation {
    Violation::new(
        code,
        rule,
        Severity::Error,
        Location::new(ctx.file.relative_path.clone(), line),
        message,
    )
}

/// All functions in a module: top-level defs plus every class method.
pub(crate) fn all_functions(module: &PyModule) -> impl Iterator<Item = &PyFunction> {
    module
        .functions
        .iter()
        .chain(module.classes.iter().flat_map(|c| c.methods.iter()))
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared scaffolding for rule unit tests: parse a snippet and run one
    //! rule against it under a synthetic path.

    use std::path::Path;

    use layer_lint_core::{
        CheckContext, ClassRule, ContractIndex, ExemptionRule, FileContext, FileRule, Memo,
        Violation,
    };
    use layer_lint_py::{PyModule, PythonExtractor};

    pub(crate) fn parse(src: &str) -> PyModule {
        PythonExtractor::new().parse(src).expect("parse failed")
    }

    pub(crate) fn check_file_at(rule: &dyn FileRule, path: &str, src: &str) -> Vec<Violation> {
        let module = parse(src);
        let contracts = ContractIndex::new();
        let exemptions = ExemptionRule::new();
        let memo = Memo::new();
        let ctx = CheckContext {
            file: FileContext::new(Path::new(path), src),
            contracts: &contracts,
            exemptions: &exemptions,
            memo: &memo,
        };
        rule.check(&ctx, &module)
    }

    pub(crate) fn check_classes_at(rule: &dyn ClassRule, path: &str, src: &str) -> Vec<Violation> {
        let module = parse(src);
        let contracts = ContractIndex::new();
        let exemptions = ExemptionRule::new();
        let memo = Memo::new();
        let ctx = CheckContext {
            file: FileContext::new(Path::new(path), src),
            contracts: &contracts,
            exemptions: &exemptions,
            memo: &memo,
        };
        let mut out = Vec::new();
        for class in &module.classes {
            out.extend(rule.check(&ctx, class, &module));
        }
        out
    }

    pub(crate) fn check_classes_with_contracts(
        rule: &dyn ClassRule,
        path: &str,
        src: &str,
        contracts: &ContractIndex,
    ) -> Vec<Violation> {
        let module = parse(src);
        let exemptions = ExemptionRule::new();
        let memo = Memo::new();
        let ctx = CheckContext {
            file: FileContext::new(Path::new(path), src),
            contracts,
            exemptions: &exemptions,
            memo: &memo,
        };
        let mut out = Vec::new();
        for class in &module.classes {
            out.extend(rule.check(&ctx, class, &module));
        }
        out
    }
}
