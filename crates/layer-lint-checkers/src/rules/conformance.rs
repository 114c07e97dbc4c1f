//! Interface conformance for implementation classes.
//!
//! `Impl*` classes must name an `I*` base, implement every contract method,
//! and match the contract signatures textually. The contract side comes
//! from the precomputed [`ContractIndex`]; no filesystem access happens
//! here.

use layer_lint_core::{registry, CheckContext, ClassRule, ContractInterface, Violation};
use layer_lint_py::helper::{annotation_head, to_snake_case};
use layer_lint_py::{PyClass, PyModule};

use super::violation;

fn declared_interfaces<'a>(
    ctx: &'a CheckContext<'_>,
    class: &PyClass,
) -> Vec<&'a ContractInterface> {
    class
        .bases
        .iter()
        .map(|b| annotation_head(b))
        .filter_map(|b| ctx.contracts.get(b))
        .collect()
}

fn names_interface_base(class: &PyClass) -> bool {
    class.bases.iter().any(|b| {
        let head = annotation_head(b);
        head.len() > 1
            && head.starts_with('I')
            && head[1..].chars().next().is_some_and(char::is_uppercase)
    })
}

/// Implementation classes must inherit from an interface.
pub struct MustImplementInterface;

impl ClassRule for MustImplementInterface {
    fn name(&self) -> &'static str {
        "conformance"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        if names_interface_base(class) {
            return Vec::new();
        }
        vec![violation(
            ctx,
            "LL701",
            self.name(),
            class.line,
            format!(
                "`{}` must implement an interface from _01_contracts",
                class.name
            ),
        )]
    }
}

/// Every method declared on the implemented interfaces must be present.
pub struct InterfaceMethodsPresent;

impl ClassRule for InterfaceMethodsPresent {
    fn name(&self) -> &'static str {
        "conformance"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for iface in declared_interfaces(ctx, class) {
            for sig in &iface.methods {
                if class.method(&sig.name).is_none() {
                    out.push(violation(
                        ctx,
                        "LL702",
                        self.name(),
                        class.line,
                        format!(
                            "`{}` is missing method `{}` declared on `{}`",
                            class.name, sig.name, iface.name
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// Implemented methods must match the contract signature: same parameter
/// names, same annotations, same return type. Comparison is textual.
pub struct SignatureMatchesContract;

impl ClassRule for SignatureMatchesContract {
    fn name(&self) -> &'static str {
        "conformance"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for iface in declared_interfaces(ctx, class) {
            for sig in &iface.methods {
                let Some(method) = class.method(&sig.name) else {
                    continue;
                };
                let params = method.logical_params();
                if params.len() != sig.params.len() {
                    out.push(violation(
                        ctx,
                        "LL703",
                        self.name(),
                        method.line,
                        format!(
                            "`{}.{}` takes {} parameters but `{}` declares {}",
                            class.name,
                            sig.name,
                            params.len(),
                            iface.name,
                            sig.params.len()
                        ),
                    ));
                    continue;
                }
                for (have, want) in params.iter().zip(&sig.params) {
                    if have.name != want.name {
                        out.push(violation(
                            ctx,
                            "LL704",
                            self.name(),
                            have.line,
                            format!(
                                "`{}.{}` names a parameter `{}` where `{}` says `{}`",
                                class.name, sig.name, have.name, iface.name, want.name
                            ),
                        ));
                    } else if have.annotation != want.annotation {
                        out.push(violation(
                            ctx,
                            "LL705",
                            self.name(),
                            have.line,
                            format!(
                                "`{}.{}` types `{}` as `{}` where `{}` says `{}`",
                                class.name,
                                sig.name,
                                have.name,
                                have.annotation.as_deref().unwrap_or("<none>"),
                                iface.name,
                                want.annotation.as_deref().unwrap_or("<none>")
                            ),
                        ));
                    }
                }
                if method.returns != sig.returns {
                    out.push(violation(
                        ctx,
                        "LL706",
                        self.name(),
                        method.line,
                        format!(
                            "`{}.{}` returns `{}` where `{}` says `{}`",
                            class.name,
                            sig.name,
                            method.returns.as_deref().unwrap_or("<none>"),
                            iface.name,
                            sig.returns.as_deref().unwrap_or("<none>")
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// `__init__` dependencies must be typed with interfaces, records, enums,
/// or primitives, and must stay few.
pub struct InitDependencies {
    /// Maximum `__init__` parameters after `self`.
    pub max_params: usize,
}

impl Default for InitDependencies {
    fn default() -> Self {
        Self {
            max_params: registry::MAX_INIT_PARAMS,
        }
    }
}

fn acceptable_dependency_type(head: &str) -> bool {
    registry::PRIMITIVE_TYPES.contains(&head)
        || ["I", "D", "E", "Abstract", "Model", "Repo"].iter().any(|p| {
            head.strip_prefix(p)
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_uppercase)
        })
}

impl ClassRule for InitDependencies {
    fn name(&self) -> &'static str {
        "conformance"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let Some(init) = class.method("__init__") else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let params = init.logical_params();
        if params.len() > self.max_params {
            out.push(violation(
                ctx,
                "LL707",
                self.name(),
                init.line,
                format!(
                    "`{}.__init__` takes {} dependencies; more than {} means the class does too much",
                    class.name,
                    params.len(),
                    self.max_params
                ),
            ));
        }
        for param in params {
            let Some(ann) = &param.annotation else {
                out.push(violation(
                    ctx,
                    "LL708",
                    self.name(),
                    param.line,
                    format!(
                        "dependency `{}` of `{}.__init__` needs a type annotation",
                        param.name, class.name
                    ),
                ));
                continue;
            };
            let head = annotation_head(ann);
            if !acceptable_dependency_type(head) {
                out.push(violation(
                    ctx,
                    "LL709",
                    self.name(),
                    param.line,
                    format!(
                        "dependency `{}` of `{}.__init__` is typed `{head}`; inject an interface or record",
                        param.name, class.name
                    ),
                ));
            }
        }
        out
    }
}

/// Parameters typed with an interface must be named after it: `writer:
/// ILogWriter` is `log_writer` (or a suffix of it), not `w`.
pub struct InterfaceParamNaming;

impl ClassRule for InterfaceParamNaming {
    fn name(&self) -> &'static str {
        "conformance"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for method in &class.methods {
            for param in method.logical_params() {
                let Some(ann) = &param.annotation else {
                    continue;
                };
                let head = annotation_head(ann);
                let Some(rest) = head.strip_prefix('I') else {
                    continue;
                };
                if !rest.chars().next().is_some_and(char::is_uppercase) {
                    continue;
                }
                let expected = to_snake_case(rest);
                if param.name != expected && !expected.ends_with(&format!("_{}", param.name)) {
                    out.push(violation(
                        ctx,
                        "LL710",
                        self.name(),
                        param.line,
                        format!(
                            "parameter `{}` typed `{head}` should be named `{expected}`",
                            param.name
                        ),
                    ));
                }
            }
        }
        out
    }
}
