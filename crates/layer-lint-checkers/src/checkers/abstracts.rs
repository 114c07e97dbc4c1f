//! Abstract base checker (`_03_abstracts/abstract_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::imports::NoFunctionInternalImports;
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::naming::{ClassNaming, FileNaming, MethodNaming};

/// Checks `Abstract*` base classes.
#[must_use]
pub fn abstract_checker() -> Checker {
    Checker::new("abstract")
        .for_layer(Layer::Abstracts)
        .with_file_prefix("abstract_")
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
        .with_class_group("naming", vec![Box::new(ClassNaming)])
        .with_class_group("methods", vec![Box::new(MethodNaming)])
}
