//! `@override` coverage on implementation classes.

use layer_lint_core::{CheckContext, ClassRule, Violation};
use layer_lint_py::helper::is_dunder;
use layer_lint_py::{PyClass, PyModule};

use super::violation;

/// Every non-dunder method on an implementation class must carry
/// `@override` so contract drift is caught by the type checker too.
pub struct RequireOverride;

impl ClassRule for RequireOverride {
    fn name(&self) -> &'static str {
        "override"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        class
            .methods
            .iter()
            .filter(|m| !is_dunder(&m.name))
            .filter(|m| !m.has_decorator(&["override"]))
            .map(|m| {
                violation(
                    ctx,
                    "LL801",
                    self.name(),
                    m.line,
                    format!("method `{}` must be decorated with @override", m.name),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_classes_at;
    use super::*;

    const IMPLS: &str = "src/modules/m/_05_impls/impl_log.py";

    #[test]
    fn undecorated_method_is_reported_by_name() {
        let src = "class ImplLog(ILog):\n    def __init__(self, repo: IRepoLog):\n        self.repo = repo\n    @override\n    def write(self, line: str) -> None:\n        pass\n    def flush(self) -> None:\n        pass\n";
        let out = check_classes_at(&RequireOverride, IMPLS, src);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("`flush` must be decorated with @override"));
    }

    #[test]
    fn qualified_override_decorator_counts() {
        let src = "class ImplLog(ILog):\n    @typing.override\n    def write(self, line: str) -> None:\n        pass\n";
        let out = check_classes_at(&RequireOverride, IMPLS, src);
        assert!(out.is_empty());
    }
}
