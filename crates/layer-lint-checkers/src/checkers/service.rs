//! Service facade checker (`_06_services`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::conformance::InitDependencies;
use crate::rules::imports::{ForbiddenLayerImports, NoFunctionInternalImports};
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::naming::ClassNaming;

/// Checks service facades.
#[must_use]
pub fn service_checker() -> Checker {
    Checker::new("service")
        .for_layer(Layer::Services)
        .with_file_group(
            "imports",
            vec![
                Box::new(NoFunctionInternalImports),
                Box::new(ForbiddenLayerImports),
            ],
        )
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
        .with_class_group("naming", vec![Box::new(ClassNaming)])
        .with_class_group("deps", vec![Box::new(InitDependencies::default())])
}
