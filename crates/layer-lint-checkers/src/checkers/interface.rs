//! Contract interface checker (`_01_contracts/i_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::imports::{
    ForbiddenLayerImports, NoConstantModules, NoFunctionInternalImports, RelativeImportsResolve,
};
use crate::rules::interface::{
    AbstractMethodMarkers, ActionConsistency, InterfaceFileCount, InterfaceMethodCount,
    ParamTypeConsistency,
};
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::naming::{ClassNaming, FileNaming, MethodNaming};

/// Checks `I*` interface declarations.
#[must_use]
pub fn interface_checker() -> Checker {
    Checker::new("interface")
        .for_layer(Layer::Contracts)
        .with_file_prefix("i_")
        .with_file_group(
            "naming",
            vec![Box::new(FileNaming {
                allowed_prefixes: &[],
            })],
        )
        .with_file_group(
            "imports",
            vec![
                Box::new(NoFunctionInternalImports),
                Box::new(RelativeImportsResolve),
                Box::new(NoConstantModules),
                Box::new(ForbiddenLayerImports),
            ],
        )
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
        .with_file_group(
            "interface-count",
            vec![Box::new(InterfaceFileCount::default())],
        )
        .with_file_group(
            "consistency",
            vec![Box::new(ParamTypeConsistency), Box::new(ActionConsistency)],
        )
        .with_class_group("naming", vec![Box::new(ClassNaming)])
        .with_class_group("size", vec![Box::new(InterfaceMethodCount::default())])
        .with_class_group("abstract", vec![Box::new(AbstractMethodMarkers)])
        .with_class_group("methods", vec![Box::new(MethodNaming)])
}
