//! Signature hygiene: every parameter and return type annotated, no `Any`,
//! no `Optional`/`| None`, no quoted forward references in impls.

use layer_lint_core::{CheckContext, FileRule, Violation};
use layer_lint_py::helper::{is_any_annotation, is_optional_annotation, is_quoted_annotation};
use layer_lint_py::{PyFunction, PyModule};

use super::violation;

fn check_function(
    ctx: &CheckContext<'_>,
    function: &PyFunction,
    rule: &'static str,
    out: &mut Vec<Violation>,
) {
    for param in function.logical_params() {
        match &param.annotation {
            None if !function.has_star_args && !function.has_kw_args => {
                out.push(violation(
                    ctx,
                    "LL201",
                    rule,
                    param.line,
                    format!(
                        "parameter `{}` of `{}` needs a type annotation",
                        param.name, function.name
                    ),
                ));
            }
            Some(ann) if is_any_annotation(ann) => {
                out.push(violation(
                    ctx,
                    "LL202",
                    rule,
                    param.line,
                    format!(
                        "parameter `{}` of `{}` must not be typed `Any`",
                        param.name, function.name
                    ),
                ));
            }
            Some(ann) if is_optional_annotation(ann) => {
                out.push(violation(
                    ctx,
                    "LL203",
                    rule,
                    param.line,
                    format!(
                        "parameter `{}` of `{}` must not admit None; model absence explicitly",
                        param.name, function.name
                    ),
                ));
            }
            _ => {}
        }
    }
    match &function.returns {
        None if !layer_lint_py::helper::is_dunder(&function.name) => {
            out.push(violation(
                ctx,
                "LL204",
                rule,
                function.line,
                format!("`{}` needs a return type annotation", function.name),
            ));
        }
        Some(ret) if is_any_annotation(ret) => {
            out.push(violation(
                ctx,
                "LL205",
                rule,
                function.line,
                format!("`{}` must not return `Any`", function.name),
            ));
        }
        Some(ret) if is_optional_annotation(ret) => {
            out.push(violation(
                ctx,
                "LL206",
                rule,
                function.line,
                format!("`{}` must not return an Optional type", function.name),
            ));
        }
        _ => {}
    }
}

/// Bans `Any` and `Optional`/`| None` and requires annotations on every
/// function and method in the file.
pub struct StrictSignatures;

impl FileRule for StrictSignatures {
    fn name(&self) -> &'static str {
        "signatures"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            check_function(ctx, function, self.name(), &mut out);
        }
        out
    }
}

/// Quoted forward-reference annotations hide real imports; contracts must
/// import their types.
pub struct NoQuotedAnnotations;

impl FileRule for NoQuotedAnnotations {
    fn name(&self) -> &'static str {
        "signatures"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for param in function.logical_params() {
                if let Some(ann) = &param.annotation {
                    if is_quoted_annotation(ann) {
                        out.push(violation(
                            ctx,
                            "LL207",
                            self.name(),
                            param.line,
                            format!(
                                "parameter `{}` uses a quoted annotation {ann}; import the type instead",
                                param.name
                            ),
                        ));
                    }
                }
            }
            if let Some(ret) = &function.returns {
                if is_quoted_annotation(ret) {
                    out.push(violation(
                        ctx,
                        "LL208",
                        self.name(),
                        function.line,
                        format!(
                            "`{}` uses a quoted return annotation {ret}; import the type instead",
                            function.name
                        ),
                    ));
                }
            }
        }
        for class in &module.classes {
            for field in &class.fields {
                if is_quoted_annotation(&field.annotation) {
                    out.push(violation(
                        ctx,
                        "LL209",
                        self.name(),
                        field.line,
                        format!(
                            "field `{}` uses a quoted annotation; import the type instead",
                            field.name
                        ),
                    ));
                }
            }
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
    fn optional_and_any_are_banned() {
        let out = check_file_at(
            &StrictSignatures,
            IMPLS,
            "class ImplUser:\n    def get(self, user_id: Optional[str]) -> Any:\n        pass\n",
        );
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|v| v.message.contains("must not admit None")));
        assert!(out.iter().any(|v| v.message.contains("must not return `Any`")));
    }

    #[test]
    fn pipe_none_is_banned() {
        let out = check_file_at(
            &StrictSignatures,
            IMPLS,
            "class ImplUser:\n    def get(self, user_id: str) -> DUser | None:\n        pass\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("Optional"));
    }

    #[test]
    fn missing_annotations_are_reported() {
        let out = check_file_at(
            &StrictSignatures,
            IMPLS,
            "class ImplUser:\n    def get(self, user_id):\n        pass\n",
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn dunder_methods_need_no_return_annotation() {
        let out = check_file_at(
            &StrictSignatures,
            IMPLS,
            "class ImplUser:\n    def __init__(self, repo: IRepoUser):\n        self.repo = repo\n",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn quoted_annotations_are_banned() {
        let out = check_file_at(
            &NoQuotedAnnotations,
            IMPLS,
            "class ImplUser:\n    def get(self, user: \"DUser\") -> \"DUser\":\n        pass\n",
        );
        assert_eq!(out.len(), 2);
    }
}
