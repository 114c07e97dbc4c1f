//! The layer-dependency rule: imports may only point down the allowed
//! edges of the seven-layer graph.

use layer_lint_core::{CheckContext, FileRule, Layer, Violation};
use layer_lint_py::{ImportStmt, PyModule};

use super::violation;

/// Layer a single import statement points at, if it names one.
///
/// Absolute imports are classified by their dotted path; relative imports
/// by the `_0N_*` segment they traverse.
fn import_layer(import: &ImportStmt) -> Option<Layer> {
    if let Some(layer) = Layer::from_import_path(&import.module) {
        return Some(layer);
    }
    import
        .names
        .iter()
        .find_map(|n| Layer::from_import_path(&n.name))
}

/// Enforces the allowed-dependency table for the file's layer.
pub struct LayerDependencies;

impl FileRule for LayerDependencies {
    fn name(&self) -> &'static str {
        "layer-deps"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let Some(from) = ctx.file.layer else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for import in &module.imports {
            let Some(to) = import_layer(import) else {
                continue;
            };
            if !from.may_depend_on(to) {
                out.push(violation(
                    ctx,
                    "LLC01",
                    self.name(),
                    import.line,
                    format!("{from} should not depend on {to}"),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_file_at;
    use super::*;

    #[test]
    fn models_may_not_import_impls() {
        let out = check_file_at(
            &LayerDependencies,
            "src/modules/m/_04_models/repo_log.py",
            "from .._05_impls.impl_log import ImplLog\n",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "models should not depend on impls");
    }

    #[test]
    fn impls_may_import_contracts_and_models() {
        let out = check_file_at(
            &LayerDependencies,
            "src/modules/m/_05_impls/impl_log.py",
            "from .._01_contracts.i_log import ILog\nfrom .._04_models.repo_log import RepoLog\n",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn contracts_may_import_nothing_layered() {
        let out = check_file_at(
            &LayerDependencies,
            "src/modules/m/_01_contracts/i_log.py",
            "from .._02_dtos.dto_log import DtoLog\nimport dataclasses\n",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "contracts should not depend on dtos");
    }

    #[test]
    fn same_layer_imports_pass() {
        let out = check_file_at(
            &LayerDependencies,
            "src/modules/m/_01_contracts/d_log.py",
            "from .e_level import ELevel\nfrom .._01_contracts.e_level import ELevel\n",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn absolute_layered_imports_are_classified() {
        let out = check_file_at(
            &LayerDependencies,
            "src/modules/m/_06_services/service_log.py",
            "from modules.m._05_impls.impl_log import ImplLog\n",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "services should not depend on impls");
    }
}
