//! Member rules: no private members, no class-level constants, no `*_map`
//! members.

use layer_lint_core::{CheckContext, ClassRule, Violation};
use layer_lint_py::helper::is_private;
use layer_lint_py::{Feature, PyClass, PyModule};

use super::violation;

/// Bans underscore-private fields and attributes.
///
/// Hidden state on a contract-shaped class means the contract lies about
/// the data. Attribute writes inside methods (`self._cache = ...`) are
/// caught too.
pub struct NoPrivateMembers;

impl ClassRule for NoPrivateMembers {
    fn name(&self) -> &'static str {
        "members"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for field in &class.fields {
            if is_private(&field.name) {
                out.push(violation(
                    ctx,
                    "LL601",
                    self.name(),
                    field.line,
                    format!("private field `{}` on `{}`", field.name, class.name),
                ));
            }
        }
        for var in &class.class_vars {
            if is_private(&var.target) {
                out.push(violation(
                    ctx,
                    "LL601",
                    self.name(),
                    var.line,
                    format!("private class var `{}` on `{}`", var.target, class.name),
                ));
            }
        }
        for method in &class.methods {
            for body in &method.body {
                let Feature::Assign { target } = &body.feature else {
                    continue;
                };
                if let Some(attr) = target.strip_prefix("self.") {
                    if is_private(attr) {
                        out.push(violation(
                            ctx,
                            "LL602",
                            self.name(),
                            body.line,
                            format!(
                                "private attribute `self.{attr}` on `{}`; declare it on the contract",
                                class.name
                            ),
                        ));
                    }
                }
            }
        }
        out
    }
}

/// Bans UPPER_CASE class-level constants; fixed value sets belong in enums.
pub struct NoClassConstants;

impl ClassRule for NoClassConstants {
    fn name(&self) -> &'static str {
        "members"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        class
            .class_vars
            .iter()
            .filter(|v| {
                !v.target.starts_with("__")
                    && v.target
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
                    && v.target.chars().any(|c| c.is_ascii_uppercase())
            })
            .map(|v| {
                violation(
                    ctx,
                    "LL603",
                    self.name(),
                    v.line,
                    format!(
                        "class constant `{}` on `{}`; move it into an enum in _01_contracts",
                        v.target, class.name
                    ),
                )
            })
            .collect()
    }
}

/// Bans `*_map` / `*_mapping` members; lookup tables belong behind an
/// interface, not on a record.
pub struct NoMappingMembers;

impl ClassRule for NoMappingMembers {
    fn name(&self) -> &'static str {
        "members"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        let flag = |name: &str| name.ends_with("_map") || name.ends_with("_mapping");
        for field in &class.fields {
            if flag(&field.name) {
                out.push(violation(
                    ctx,
                    "LL604",
                    self.name(),
                    field.line,
                    format!("mapping member `{}` on `{}`", field.name, class.name),
                ));
            }
        }
        for var in &class.class_vars {
            if flag(&var.target) {
                out.push(violation(
                    ctx,
                    "LL604",
                    self.name(),
                    var.line,
                    format!("mapping member `{}` on `{}`", var.target, class.name),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_classes_at;
    use super::*;

    const IMPLS: &str = "src/modules/m/_05_impls/impl_user.py";

    #[test]
    fn private_attribute_writes_are_reported() {
        let out = check_classes_at(
            &NoPrivateMembers,
            IMPLS,
            "class ImplUser:\n    def __init__(self, repo: IRepoUser):\n        self._cache = {}\n        self.repo = repo\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("self._cache"));
    }

    #[test]
    fn class_constants_point_to_enums() {
        let out = check_classes_at(
            &NoClassConstants,
            IMPLS,
            "class ImplUser:\n    MAX_RETRIES = 3\n    __tablename__ = \"users\"\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("enum"));
    }

    #[test]
    fn mapping_members_are_reported() {
        let out = check_classes_at(
            &NoMappingMembers,
            IMPLS,
            "class ImplUser:\n    status_map: dict[str, str]\n",
        );
        assert_eq!(out.len(), 1);
    }
}
