//! Import hygiene: no function-internal imports, resolvable relative
//! imports, honest `__init__.py` re-exports, no constant modules, no
//! framework imports in the wrong layer.

use std::path::PathBuf;

use layer_lint_core::{registry, CheckContext, FileRule, Violation};
use layer_lint_py::{Feature, ImportStmt, PyModule, PythonExtractor};

use super::violation;

/// Imports executed inside function bodies hide dependencies from the
/// module header. Router wiring files are exempt (they import lazily to
/// break startup cycles).
pub struct NoFunctionInternalImports;

impl FileRule for NoFunctionInternalImports {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        if registry::INTERNAL_IMPORT_EXEMPT_PREFIXES
            .iter()
            .any(|p| ctx.file.file_starts_with(p))
        {
            return Vec::new();
        }
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                if matches!(body.feature, Feature::Import) {
                    out.push(violation(
                        ctx,
                        "LLB01",
                        self.name(),
                        body.line,
                        format!(
                            "import inside `{}`; move it to the module header",
                            function.name
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// Resolves a relative import against the importing file's directory.
///
/// Level 1 is the file's own package; each further dot climbs one package.
fn relative_target(ctx: &CheckContext<'_>, import: &ImportStmt) -> Option<PathBuf> {
    let mut dir = ctx.file.path.parent()?.to_path_buf();
    for _ in 1..import.relative_level {
        dir = dir.parent()?.to_path_buf();
    }
    for segment in import.module.split('.').filter(|s| !s.is_empty()) {
        dir = dir.join(segment);
    }
    Some(dir)
}

fn module_exists(base: &std::path::Path) -> bool {
    base.with_extension("py").is_file() || base.join("__init__.py").is_file()
}

/// Relative imports must point at files that exist.
pub struct RelativeImportsResolve;

impl FileRule for RelativeImportsResolve {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for import in &module.imports {
            if import.relative_level == 0 {
                continue;
            }
            let Some(base) = relative_target(ctx, import) else {
                continue;
            };
            let resolves = if import.module.is_empty() {
                // `from . import name`: each name is a sibling module or a
                // re-export from the package __init__.
                import.names.iter().all(|n| {
                    module_exists(&base.join(&n.name)) || base.join("__init__.py").is_file()
                })
            } else {
                module_exists(&base)
            };
            if !resolves {
                out.push(violation(
                    ctx,
                    "LLB02",
                    self.name(),
                    import.line,
                    format!(
                        "relative import `{}{}` does not resolve to a file",
                        ".".repeat(import.relative_level),
                        import.module
                    ),
                ));
            }
        }
        out
    }
}

/// Names re-exported by an `__init__.py` must be defined in the module
/// they are imported from.
pub struct InitReexportsDefined;

impl FileRule for InitReexportsDefined {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        if !ctx.file.is_init_file() {
            return Vec::new();
        }
        let extractor = PythonExtractor::new();
        let mut out = Vec::new();

        for import in &module.imports {
            if import.relative_level == 0 || !import.is_from || import.is_wildcard {
                continue;
            }
            let Some(base) = relative_target(ctx, import) else {
                continue;
            };
            let file = base.with_extension("py");
            let Ok(source) = std::fs::read_to_string(&file) else {
                continue;
            };
            let Ok(target) = extractor.parse(&source) else {
                continue;
            };
            let defined = target.defined_names();
            for name in &import.names {
                if !defined.contains(&name.name.as_str()) {
                    out.push(violation(
                        ctx,
                        "LLB03",
                        self.name(),
                        import.line,
                        format!(
                            "`{}` re-exports `{}` but `{}.py` does not define it",
                            ctx.file.file_name, name.name, import.module
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// Constant modules (`c_*` files, `C*` classes) are banned; fixed values
/// belong in enums.
pub struct NoConstantModules;

impl FileRule for NoConstantModules {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for import in &module.imports {
            let from_constant_module = import
                .module
                .rsplit('.')
                .next()
                .is_some_and(|m| m.starts_with("c_"));
            if from_constant_module {
                out.push(violation(
                    ctx,
                    "LLB04",
                    self.name(),
                    import.line,
                    format!(
                        "import from constant module `{}`; use an enum in _01_contracts",
                        import.module
                    ),
                ));
                continue;
            }
            for name in &import.names {
                let is_constant_class = name.name.len() > 1
                    && name.name.starts_with('C')
                    && name.name[1..]
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c == '_');
                if is_constant_class {
                    out.push(violation(
                        ctx,
                        "LLB05",
                        self.name(),
                        import.line,
                        format!("constant class `{}` imported; use an enum", name.name),
                    ));
                }
            }
        }
        out
    }
}

/// Framework imports that a layer may never touch, per the registry table.
pub struct ForbiddenLayerImports;

impl FileRule for ForbiddenLayerImports {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let Some(layer) = ctx.file.layer else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for import in &module.imports {
            let roots: Vec<&str> = if import.is_from {
                vec![import.module.as_str()]
            } else {
                import.names.iter().map(|n| n.name.as_str()).collect()
            };
            for root in roots {
                let top = root.split('.').next().unwrap_or(root);
                for (dir, fragment, reason) in registry::FORBIDDEN_LAYER_IMPORTS {
                    if layer.dir_name() == *dir && top == *fragment {
                        out.push(violation(
                            ctx,
                            "LLB06",
                            self.name(),
                            import.line,
                            format!("`{top}` imported in {}: {reason}", layer.dir_name()),
                        ));
                    }
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
    fn function_internal_import_is_reported() {
        let out = check_file_at(
            &NoFunctionInternalImports,
            IMPLS,
            "class ImplLog:\n    def write(self, line: str) -> None:\n        import json\n        json.dumps(line)\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("module header"));
    }

    #[test]
    fn router_wiring_files_are_exempt_from_internal_imports() {
        let out = check_file_at(
            &NoFunctionInternalImports,
            "src/modules/m/_07_router/deps_log.py",
            "def get_log_service() -> object:\n    from .._06_services.service_log import ServiceLog\n    return ServiceLog()\n",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn unresolvable_relative_import_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let impls = dir.path().join("src/modules/m/_05_impls");
        std::fs::create_dir_all(&impls).expect("mkdir");
        let file = impls.join("impl_log.py");
        let src = "from .._01_contracts.i_log import ILog\n";
        std::fs::write(&file, src).expect("write");

        let out = check_file_at(&RelativeImportsResolve, &file.display().to_string(), src);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("does not resolve"));
    }

    #[test]
    fn resolvable_relative_import_passes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = dir.path().join("src/modules/m");
        let contracts = module.join("_01_contracts");
        let impls = module.join("_05_impls");
        std::fs::create_dir_all(&contracts).expect("mkdir");
        std::fs::create_dir_all(&impls).expect("mkdir");
        std::fs::write(contracts.join("i_log.py"), "class ILog:\n    pass\n").expect("write");
        let file = impls.join("impl_log.py");
        let src = "from .._01_contracts.i_log import ILog\n";
        std::fs::write(&file, src).expect("write");

        let out = check_file_at(&RelativeImportsResolve, &file.display().to_string(), src);
        assert!(out.is_empty());
    }

    #[test]
    fn init_reexports_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let contracts = dir.path().join("src/modules/m/_01_contracts");
        std::fs::create_dir_all(&contracts).expect("mkdir");
        std::fs::write(contracts.join("i_log.py"), "class ILog:\n    pass\n").expect("write");
        let init = contracts.join("__init__.py");
        let src = "from .i_log import ILog, ILogWriter\n";
        std::fs::write(&init, src).expect("write");

        let out = check_file_at(&InitReexportsDefined, &init.display().to_string(), src);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("ILogWriter"));
    }

    #[test]
    fn constant_modules_are_banned() {
        let out = check_file_at(
            &NoConstantModules,
            IMPLS,
            "from .c_limits import MAX_SIZE\nfrom .i_log import CLIMITS\n",
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn orm_import_in_router_is_reported() {
        let out = check_file_at(
            &ForbiddenLayerImports,
            "src/modules/m/_07_router/router_log.py",
            "import sqlalchemy\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("router layer may not import the ORM"));
    }

    #[test]
    fn orm_import_in_models_is_fine() {
        let out = check_file_at(
            &ForbiddenLayerImports,
            "src/modules/m/_04_models/model_log.py",
            "import sqlalchemy\n",
        );
        assert!(out.is_empty());
    }
}
