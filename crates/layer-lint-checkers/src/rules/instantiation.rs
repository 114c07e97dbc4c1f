//! Direct instantiation control: collaborators arrive through `__init__`,
//! never `SomeClass()` inside a method body.

use layer_lint_core::{registry, CheckContext, FileRule, Violation};
use layer_lint_py::{Feature, PyModule};

use super::violation;

fn is_record_name(name: &str) -> bool {
    ["D", "E"].iter().any(|p| {
        name.strip_prefix(p)
            .and_then(|rest| rest.chars().next())
            .is_some_and(char::is_uppercase)
    })
}

fn looks_like_error(name: &str) -> bool {
    name.ends_with("Error") || name.ends_with("Exception")
}

/// Bans construction of non-record classes inside function bodies.
///
/// Records (`D*`, `E*`), stdlib values, and exceptions are data and may be
/// built anywhere; everything else is a collaborator and must be injected.
/// `__init__` bodies are exempt because wiring happens there.
pub struct NoDirectInstantiation;

impl FileRule for NoDirectInstantiation {
    fn name(&self) -> &'static str {
        "instantiation"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            if function.name == "__init__" {
                continue;
            }
            for body in &function.body {
                let Feature::Construct { name } = &body.feature else {
                    continue;
                };
                if registry::STDLIB_CONSTRUCTIBLE.contains(&name.as_str())
                    || is_record_name(name)
                    || looks_like_error(name)
                {
                    continue;
                }
                out.push(violation(
                    ctx,
                    "LLE01",
                    self.name(),
                    body.line,
                    format!(
                        "`{name}` constructed inside `{}`; inject it through __init__",
                        function.name
                    ),
                ));
            }
        }
        out
    }
}

/// Bans dict-literal data assembly in implementation bodies; shaped data
/// is a `D*` record, not an anonymous dict.
pub struct NoDictAssembly;

impl FileRule for NoDictAssembly {
    fn name(&self) -> &'static str {
        "instantiation"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            if function.name == "__init__" {
                continue;
            }
            for body in &function.body {
                if matches!(body.feature, Feature::DictLiteral) {
                    out.push(violation(
                        ctx,
                        "LLE02",
                        self.name(),
                        body.line,
                        format!(
                            "dict literal assembled in `{}`; define a record in _01_contracts",
                            function.name
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

    const IMPLS: &str = "src/modules/m/_05_impls/impl_log.py";

    #[test]
    fn collaborator_construction_is_reported() {
        let out = check_file_at(
            &NoDirectInstantiation,
            IMPLS,
            "class ImplLog(ILog):\n    def write(self, line: str) -> None:\n        client = HttpClient()\n        client.post(line)\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("HttpClient"));
    }

    #[test]
    fn records_errors_and_stdlib_are_fine() {
        let src = "class ImplLog(ILog):\n    def read(self, log_id: str) -> DLog:\n        entry = DLog(log_id)\n        stamp = datetime(2024, 1, 1)\n        raise ValueError(log_id)\n";
        let out = check_file_at(&NoDirectInstantiation, IMPLS, src);
        assert!(out.is_empty());
    }

    #[test]
    fn dict_assembly_is_reported() {
        let out = check_file_at(
            &NoDictAssembly,
            IMPLS,
            "class ImplLog(ILog):\n    def payload(self, log_id: str) -> dict:\n        return {\"log_id\": log_id}\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("define a record"));
    }

    #[test]
    fn init_bodies_may_construct() {
        let out = check_file_at(
            &NoDirectInstantiation,
            IMPLS,
            "class ImplLog(ILog):\n    def __init__(self, dsn: str):\n        self.engine = Engine(dsn)\n",
        );
        assert!(out.is_empty());
    }
}
