//! Cross-cutting import checker (every Python file).

use crate::checker::Checker;
use crate::rules::imports::{
    ForbiddenLayerImports, InitReexportsDefined, NoConstantModules, NoFunctionInternalImports,
    RelativeImportsResolve,
};
use crate::rules::layer_deps::LayerDependencies;

/// Checks import hygiene across the whole tree, including files the
/// layer-specific checkers never look at.
#[must_use]
pub fn imports_checker() -> Checker {
    Checker::new("imports")
        .scan_all()
        .with_file_group("internal", vec![Box::new(NoFunctionInternalImports)])
        .with_file_group(
            "resolution",
            vec![
                Box::new(RelativeImportsResolve),
                Box::new(InitReexportsDefined),
            ],
        )
        .with_file_group("constants", vec![Box::new(NoConstantModules)])
        .with_file_group("forbidden", vec![Box::new(ForbiddenLayerImports)])
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
}
