//! Function placement: no free-floating module functions, no static
//! methods, no private methods on public classes.

use layer_lint_core::{registry, CheckContext, ClassRule, FileRule, Violation};
use layer_lint_py::helper::{is_dunder, is_private};
use layer_lint_py::{Feature, PyClass, PyModule};

use super::violation;

/// Module-level functions must live on a class, with three escapes: the
/// allow-list (`main`), route-decorated functions, and `get_*` providers in
/// `deps_*` files.
pub struct NoStandaloneFunctions;

impl FileRule for NoStandaloneFunctions {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in &module.functions {
            if ctx.exemptions.standalone_allowed(&function.name) {
                continue;
            }
            if function.has_decorator(&ctx.exemptions.route_decorators) {
                continue;
            }
            if ctx.file.file_starts_with("deps_") && function.name.starts_with("get_") {
                continue;
            }
            if ctx.file.is_test {
                continue;
            }
            // Router helpers have their own naming rule; private helpers
            // and providers there are legitimate.
            if ctx.file.file_starts_with("router_")
                && (is_private(&function.name) || function.name.starts_with("get_"))
            {
                continue;
            }
            out.push(violation(
                ctx,
                "LLF01",
                self.name(),
                function.line,
                format!(
                    "standalone function `{}`; move it onto a class",
                    function.name
                ),
            ));
        }
        out
    }
}

/// Module-level functions in `router_*` files that are not routes must be
/// private helpers (`_name`) or providers (`get_*`).
pub struct RouterHelperNaming;

impl FileRule for RouterHelperNaming {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        if !ctx.file.file_starts_with("router_") {
            return Vec::new();
        }
        module
            .functions
            .iter()
            .filter(|f| !f.has_decorator(&ctx.exemptions.route_decorators))
            .filter(|f| !is_private(&f.name) && !f.name.starts_with("get_"))
            .map(|f| {
                violation(
                    ctx,
                    "LLF02",
                    self.name(),
                    f.line,
                    format!(
                        "helper `{}` in a router file must be `_`-prefixed or a `get_*` provider",
                        f.name
                    ),
                )
            })
            .collect()
    }
}

/// Route functions stay thin: few parameters, no ORM work inline.
pub struct RouteDiscipline {
    /// Maximum parameters on a route function.
    pub max_params: usize,
}

impl Default for RouteDiscipline {
    fn default() -> Self {
        Self {
            max_params: registry::MAX_ROUTE_PARAMS,
        }
    }
}

impl FileRule for RouteDiscipline {
    fn name(&self) -> &'static str {
        "routes"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in &module.functions {
            if !function.has_decorator(&ctx.exemptions.route_decorators) {
                continue;
            }
            let params = function.logical_params();
            if params.len() > self.max_params {
                out.push(violation(
                    ctx,
                    "LLF05",
                    self.name(),
                    function.line,
                    format!(
                        "route `{}` takes {} parameters, more than {}; bundle them into a DTO",
                        function.name,
                        params.len(),
                        self.max_params
                    ),
                ));
            }
            for body in &function.body {
                let Feature::Call { callee, .. } = &body.feature else {
                    continue;
                };
                if callee.starts_with("session.") || callee.contains(".query") {
                    out.push(violation(
                        ctx,
                        "LLF06",
                        self.name(),
                        body.line,
                        format!(
                            "route `{}` talks to the ORM directly; go through a service",
                            function.name
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// `deps_*` files hold only `get_*` provider functions.
pub struct DepsProviderNaming;

impl FileRule for DepsProviderNaming {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        if !ctx.file.file_starts_with("deps_") {
            return Vec::new();
        }
        module
            .functions
            .iter()
            .filter(|f| !f.name.starts_with("get_"))
            .map(|f| {
                violation(
                    ctx,
                    "LLF07",
                    self.name(),
                    f.line,
                    format!(
                        "`{}` in a deps file; providers are named `get_*`",
                        f.name
                    ),
                )
            })
            .collect()
    }
}

/// Static methods are functions hiding on a class; the class either needs
/// the state or the function belongs elsewhere.
pub struct NoStaticMethods;

impl ClassRule for NoStaticMethods {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        if ctx.file.is_test || ctx.exemptions.static_methods_exempt(&ctx.file.file_name) {
            return Vec::new();
        }
        class
            .methods
            .iter()
            .filter(|m| m.has_decorator(&["staticmethod"]))
            .map(|m| {
                violation(
                    ctx,
                    "LLF03",
                    self.name(),
                    m.line,
                    format!("static method `{}.{}` is not allowed", class.name, m.name),
                )
            })
            .collect()
    }
}

/// Private methods on public classes hide behavior the contract should
/// name.
pub struct NoPrivateMethods;

impl ClassRule for NoPrivateMethods {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        if ctx.file.is_test || is_private(&class.name) {
            return Vec::new();
        }
        class
            .methods
            .iter()
            .filter(|m| is_private(&m.name) && !is_dunder(&m.name))
            .map(|m| {
                violation(
                    ctx,
                    "LLF04",
                    self.name(),
                    m.line,
                    format!(
                        "private method `{}.{}`; name it on the contract or extract a collaborator",
                        class.name, m.name
                    ),
                )
            })
            .collect()
    }
}
