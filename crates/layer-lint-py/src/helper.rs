//! Shared syntactic queries over the Python IR.
//!
//! These helpers classify; they never report. Every rule family builds on
//! them so the same question is always answered the same way.

use crate::ir::{Feature, PyFunction};

/// Whether the name is a dunder like `__init__`.
#[must_use]
pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Whether the name is private by convention (leading underscore, not dunder).
#[must_use]
pub fn is_private(name: &str) -> bool {
    name.starts_with('_') && !is_dunder(name)
}

/// Whether the name is `UpperCamelCase`.
#[must_use]
pub fn is_upper_camel(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_uppercase() => {}
        _ => return false,
    }
    !name.contains('_') && name.chars().all(char::is_alphanumeric)
}

/// Whether the name is `snake_case` (lowercase with underscores).
#[must_use]
pub fn is_snake_case(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Converts `UpperCamelCase` to `snake_case`.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether the annotation is a string-quoted forward reference.
#[must_use]
pub fn is_quoted_annotation(annotation: &str) -> bool {
    let t = annotation.trim();
    (t.starts_with('"') && t.ends_with('"') && t.len() >= 2)
        || (t.starts_with('\'') && t.ends_with('\'') && t.len() >= 2)
}

/// Strips quotes from a forward-reference annotation, if any.
#[must_use]
pub fn unquote_annotation(annotation: &str) -> &str {
    let t = annotation.trim();
    if is_quoted_annotation(t) {
        &t[1..t.len() - 1]
    } else {
        t
    }
}

/// Outermost type name of an annotation, e.g. `Optional` for
/// `Optional[DUser]` and `list` for `list[str]`.
#[must_use]
pub fn annotation_head(annotation: &str) -> &str {
    let t = unquote_annotation(annotation);
    let end = t
        .find(|c: char| c == '[' || c == '(' || c == ' ' || c == '|')
        .unwrap_or(t.len());
    t[..end].trim().rsplit('.').next().unwrap_or("").trim()
}

/// Whether the annotation admits `None` (`Optional[...]`, `X | None`).
#[must_use]
pub fn is_optional_annotation(annotation: &str) -> bool {
    let t = unquote_annotation(annotation);
    t.contains("Optional[")
        || t.split('|').any(|part| part.trim() == "None")
}

/// Whether the annotation uses `Any`.
#[must_use]
pub fn is_any_annotation(annotation: &str) -> bool {
    annotation_head(annotation) == "Any"
}

/// Returns the bare container name when the annotation is a generic
/// container without element types (`list`, `Dict`, ...).
#[must_use]
pub fn bare_container(annotation: &str) -> Option<&str> {
    let t = unquote_annotation(annotation);
    if t.contains('[') {
        return None;
    }
    let head = t.rsplit('.').next().unwrap_or(t).trim();
    match head {
        "list" | "dict" | "set" | "tuple" | "List" | "Dict" | "Set" | "Tuple" => Some(head),
        _ => None,
    }
}

/// Whether a method carries the abstract-method marker.
#[must_use]
pub fn is_abstract_method(function: &PyFunction) -> bool {
    function.has_decorator(&["abstractmethod"])
}

/// Whether the body is a stub: only `pass`, a docstring, a bare string, or a
/// `raise` (with its constructor call).
#[must_use]
pub fn body_is_stub(function: &PyFunction) -> bool {
    function.body.iter().all(|b| {
        matches!(
            b.feature,
            Feature::Pass
                | Feature::Raise
                | Feature::StringExpr
                | Feature::Construct { .. }
                | Feature::Call { .. }
        )
    })
}

/// Heuristic business-logic detection: loops, conditionals, arithmetic on
/// fields, or comprehensions with filters.
#[must_use]
pub fn has_business_logic(function: &PyFunction) -> bool {
    function.body.iter().any(|b| {
        matches!(
            b.feature,
            Feature::If
                | Feature::Match
                | Feature::For { .. }
                | Feature::While
                | Feature::Ternary
                | Feature::AugAssign { .. }
                | Feature::Comprehension { filtered: true, .. }
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::PythonExtractor;
    use crate::ir::PyClass;

    fn parse_class(src: &str) -> PyClass {
        PythonExtractor::new()
            .parse(src)
            .expect("parse failed")
            .classes
            .remove(0)
    }

    #[test]
    fn casing_predicates() {
        assert!(is_dunder("__init__"));
        assert!(!is_dunder("_private"));
        assert!(is_private("_cache"));
        assert!(is_upper_camel("ImplUser"));
        assert!(!is_upper_camel("impl_user"));
        assert!(is_snake_case("log_id"));
        assert_eq!(to_snake_case("LogWriter"), "log_writer");
        assert_eq!(to_snake_case("ILogWriter"), "i_log_writer");
    }

    #[test]
    fn annotation_queries() {
        assert!(is_quoted_annotation("\"DUser\""));
        assert_eq!(annotation_head("Optional[DUser]"), "Optional");
        assert_eq!(annotation_head("list[str]"), "list");
        assert_eq!(annotation_head("typing.Dict[str, int]"), "Dict");
        assert!(is_optional_annotation("str | None"));
        assert!(is_optional_annotation("Optional[int]"));
        assert!(!is_optional_annotation("str"));
        assert_eq!(bare_container("list"), Some("list"));
        assert_eq!(bare_container("list[str]"), None);
        assert!(is_any_annotation("Any"));
    }

    #[test]
    fn stub_and_logic_detection() {
        let class = parse_class(
            "class C:\n    def stub(self):\n        raise NotImplementedError()\n    def busy(self, items):\n        total = 0\n        for item in items:\n            total += item\n        return total\n",
        );
        assert!(body_is_stub(&class.methods[0]));
        assert!(!body_is_stub(&class.methods[1]));
        assert!(!has_business_logic(&class.methods[0]));
        assert!(has_business_logic(&class.methods[1]));
    }
}
