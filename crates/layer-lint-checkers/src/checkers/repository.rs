//! Repository checker (`_04_models/repo_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::functions::NoStaticMethods;
use crate::rules::imports::NoFunctionInternalImports;
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::naming::{ClassNaming, FileNaming, MethodNaming};

/// Checks `Repo*` repositories. Repositories may branch and loop (they
/// translate queries) and take the ORM session in `__init__`, so the
/// control-flow and dependency-typing rules stay out.
#[must_use]
pub fn repository_checker() -> Checker {
    Checker::new("repository")
        .for_layer(Layer::Models)
        .with_file_prefix("repo_")
        .with_file_group(
            "naming",
            vec![Box::new(FileNaming {
                allowed_prefixes: &[],
            })],
        )
        .with_file_group(
            "imports",
            vec![Box::new(NoFunctionInternalImports), Box::new(LayerDependencies)],
        )
        .with_class_group("naming", vec![Box::new(ClassNaming), Box::new(MethodNaming)])
        .with_class_group("functions", vec![Box::new(NoStaticMethods)])
}
