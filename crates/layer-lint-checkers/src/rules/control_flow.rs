//! Control-flow and code-quality prohibitions inside implementations.
//!
//! Branch-free implementations push decisions into data and polymorphism.
//! Each rule tests one construct so the report names exactly what to fix.

use layer_lint_core::{CheckContext, FileRule, Violation};
use layer_lint_py::{Feature, PyModule};

use super::violation;

macro_rules! feature_ban {
    ($rule:ident, $code:literal, $pattern:pat, $message:literal) => {
        /// Bans one body construct; see the emitted message.
        pub struct $rule;

        impl FileRule for $rule {
            fn name(&self) -> &'static str {
                "control-flow"
            }

            fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
                let mut out = Vec::new();
                for function in super::all_functions(module) {
                    for body in &function.body {
                        if matches!(&body.feature, $pattern) {
                            out.push(violation(
                                ctx,
                                $code,
                                self.name(),
                                body.line,
                                format!(concat!($message, " (in `{}`)"), function.name),
                            ));
                        }
                    }
                }
                out
            }
        }
    };
}

feature_ban!(
    NoIfStatements,
    "LL301",
    Feature::If,
    "if statements are not allowed here; dispatch on data instead"
);
feature_ban!(
    NoMatchStatements,
    "LL302",
    Feature::Match,
    "match statements are not allowed here; dispatch on data instead"
);
feature_ban!(
    NoTernaries,
    "LL303",
    Feature::Ternary,
    "conditional expressions are not allowed here"
);
feature_ban!(
    NoFilteredComprehensions,
    "LL304",
    Feature::Comprehension { filtered: true, .. },
    "comprehensions with if clauses are not allowed here"
);
feature_ban!(
    NoLambdas,
    "LL305",
    Feature::Lambda,
    "lambdas are not allowed here; use a named method"
);
feature_ban!(
    NoAsserts,
    "LL306",
    Feature::Assert,
    "assert statements are not allowed outside tests"
);

/// Bans `for` loops in implementation bodies.
///
/// Currently inactive: existing impls stream rows with explicit loops and
/// the replacement (repository-side batching) has not landed yet.
#[allow(dead_code)]
pub struct NoForLoops;

#[allow(dead_code)]
impl NoForLoops {
    fn name(&self) -> &'static str {
        "control-flow"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                if matches!(&body.feature, Feature::For { .. }) {
                    out.push(violation(
                        ctx,
                        "LL307",
                        self.name(),
                        body.line,
                        format!("for loops are not allowed here (in `{}`)", function.name),
                    ));
                }
            }
        }
        out
    }
}

/// Bans dynamic-dispatch escapes: `isinstance`, `hasattr`, `setattr`,
/// `delattr`, `eval`, `exec`, `globals`, `locals`.
pub struct NoDynamicEscapes;

const BANNED_CALLS: &[(&str, &str)] = &[
    ("isinstance", "type-test the design away instead of isinstance"),
    ("hasattr", "hasattr probes hide missing contract methods"),
    ("setattr", "setattr bypasses the declared fields"),
    ("delattr", "delattr bypasses the declared fields"),
    ("eval", "eval is never allowed"),
    ("exec", "exec is never allowed"),
    ("globals", "globals() is never allowed"),
    ("locals", "locals() is never allowed"),
];

impl FileRule for NoDynamicEscapes {
    fn name(&self) -> &'static str {
        "code-quality"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                let Feature::Call { callee, .. } = &body.feature else {
                    continue;
                };
                let tail = callee.rsplit('.').next().unwrap_or(callee);
                if let Some((name, reason)) = BANNED_CALLS.iter().find(|(n, _)| *n == tail) {
                    out.push(violation(
                        ctx,
                        "LL308",
                        self.name(),
                        body.line,
                        format!("`{name}` is forbidden: {reason}"),
                    ));
                }
            }
        }
        out
    }
}

/// Bans `*args` / `**kwargs` in signatures.
pub struct NoStarArgs;

impl FileRule for NoStarArgs {
    fn name(&self) -> &'static str {
        "code-quality"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            if function.has_star_args || function.has_kw_args {
                out.push(violation(
                    ctx,
                    "LL309",
                    self.name(),
                    function.line,
                    format!(
                        "`{}` must declare explicit parameters, not *args/**kwargs",
                        function.name
                    ),
                ));
            }
        }
        out
    }
}

/// Bans module-level mutable state; only dunder assignments such as
/// `__all__` are allowed at module scope.
pub struct NoModuleState;

impl FileRule for NoModuleState {
    fn name(&self) -> &'static str {
        "module-state"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for assign in &module.assignments {
            let target = assign.target.as_str();
            if target.starts_with("__") && target.ends_with("__") {
                continue;
            }
            out.push(violation(
                ctx,
                "LL310",
                self.name(),
                assign.line,
                format!("module-level state `{target}` is not allowed; inject it instead"),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_file_at;
    use super::*;

    const IMPLS: &str = "src/modules/m/_05_impls/impl_user.py";

    #[test]
    fn if_statements_are_reported_with_function_name() {
        let out = check_file_at(
            &NoIfStatements,
            IMPLS,
            "class ImplUser:\n    def get(self, user_id: str) -> str:\n        if user_id:\n            return user_id\n        return \"\"\n",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location.line, 3);
        assert!(out[0].message.contains("in `get`"));
    }

    #[test]
    fn filtered_comprehension_is_banned_plain_is_not() {
        let src = "class ImplUser:\n    def names(self, users: list) -> list:\n        return [user.name for user in users]\n    def adults(self, users: list) -> list:\n        return [user for user in users if user.age > 18]\n";
        let out = check_file_at(&NoFilteredComprehensions, IMPLS, src);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location.line, 5);
    }

    #[test]
    fn isinstance_is_reported() {
        let out = check_file_at(
            &NoDynamicEscapes,
            IMPLS,
            "class ImplUser:\n    def get(self, value: object) -> bool:\n        return isinstance(value, str)\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("isinstance"));
    }

    #[test]
    fn star_args_are_banned() {
        let out = check_file_at(
            &NoStarArgs,
            IMPLS,
            "class ImplUser:\n    def get(self, *args) -> None:\n        pass\n",
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn module_state_is_banned_except_dunders() {
        let out = check_file_at(
            &NoModuleState,
            IMPLS,
            "__all__ = [\"ImplUser\"]\ncache = {}\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("cache"));
    }
}
