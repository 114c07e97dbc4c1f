//! Field rules for data records: no `Optional`, no defaults, no bare
//! containers, no generic placeholder types.

use layer_lint_core::{registry, CheckContext, ClassRule, Violation};
use layer_lint_py::helper::{annotation_head, bare_container, is_optional_annotation};
use layer_lint_py::{PyClass, PyModule};

use super::violation;

fn is_settings_class(class: &PyClass) -> bool {
    registry::SETTINGS_CLASS_SUFFIXES
        .iter()
        .any(|s| class.name.ends_with(s))
        || class.bases.iter().any(|b| {
            registry::SETTINGS_BASE_TYPES
                .iter()
                .any(|s| annotation_head(b) == *s)
        })
}

fn file_exempt(ctx: &CheckContext<'_>) -> bool {
    registry::FIELD_RULE_EXEMPT_PREFIXES
        .iter()
        .any(|p| ctx.file.file_starts_with(p))
}

/// Fields must not admit `None`.
pub struct NoOptionalFields;

impl ClassRule for NoOptionalFields {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        if file_exempt(ctx) || is_settings_class(class) {
            return Vec::new();
        }
        class
            .fields
            .iter()
            .filter(|f| is_optional_annotation(&f.annotation))
            .map(|f| {
                violation(
                    ctx,
                    "LL501",
                    self.name(),
                    f.line,
                    format!(
                        "field `{}` of `{}` must not be Optional; split the record instead",
                        f.name, class.name
                    ),
                )
            })
            .collect()
    }
}

/// Fields must not carry default values.
pub struct NoDefaultValues;

impl ClassRule for NoDefaultValues {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        if file_exempt(ctx) || is_settings_class(class) {
            return Vec::new();
        }
        class
            .fields
            .iter()
            .filter(|f| f.default.is_some())
            .map(|f| {
                violation(
                    ctx,
                    "LL502",
                    self.name(),
                    f.line,
                    format!(
                        "field `{}` of `{}` must not have a default; callers pass every field",
                        f.name, class.name
                    ),
                )
            })
            .collect()
    }
}

/// Container fields must declare their element types.
pub struct NoBareContainers;

impl ClassRule for NoBareContainers {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        class
            .fields
            .iter()
            .filter_map(|f| bare_container(&f.annotation).map(|c| (f, c)))
            .map(|(f, container)| {
                violation(
                    ctx,
                    "LL503",
                    self.name(),
                    f.line,
                    format!(
                        "field `{}` of `{}` uses bare `{container}`; declare the element type",
                        f.name, class.name
                    ),
                )
            })
            .collect()
    }
}

/// Bans the generic placeholder records (`DString`, `DDict`, ...) as field
/// types; every field deserves a concrete contract.
pub struct NoGenericPlaceholders;

impl ClassRule for NoGenericPlaceholders {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        class
            .fields
            .iter()
            .filter(|f| {
                registry::GENERIC_CONTRACT_PLACEHOLDERS
                    .contains(&annotation_head(&f.annotation))
            })
            .map(|f| {
                violation(
                    ctx,
                    "LL504",
                    self.name(),
                    f.line,
                    format!(
                        "field `{}` of `{}` uses placeholder type `{}`; define a concrete record",
                        f.name,
                        class.name,
                        annotation_head(&f.annotation)
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_classes_at;
    use super::*;

    const CONTRACTS: &str = "src/modules/m/_01_contracts/d_user.py";

    #[test]
    fn optional_fields_are_rejected() {
        let out = check_classes_at(
            &NoOptionalFields,
            CONTRACTS,
            "class DUser:\n    user_id: str\n    nickname: Optional[str]\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("nickname"));
    }

    #[test]
    fn settings_classes_are_exempt() {
        let out = check_classes_at(
            &NoOptionalFields,
            CONTRACTS,
            "class AppSettings(BaseSettings):\n    debug_host: Optional[str]\n",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn defaults_are_rejected() {
        let out = check_classes_at(
            &NoDefaultValues,
            CONTRACTS,
            "class DUser:\n    user_id: str\n    count: int = 0\n",
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn bare_containers_are_rejected() {
        let src = "class DUser:\n    tags: list\n    scores: list[int]\n";
        let out = check_classes_at(&NoBareContainers, CONTRACTS, src);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("bare `list`"));
    }

    #[test]
    fn placeholder_types_are_rejected() {
        let out = check_classes_at(
            &NoGenericPlaceholders,
            CONTRACTS,
            "class DReport:\n    payload: DDict\n",
        );
        assert_eq!(out.len(), 1);
    }
}
