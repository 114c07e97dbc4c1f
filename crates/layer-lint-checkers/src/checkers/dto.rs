//! DTO checker (`_02_dtos`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::dataclass::NoBusinessLogic;
use crate::rules::fields::{NoBareContainers, NoGenericPlaceholders};
use crate::rules::imports::{ForbiddenLayerImports, NoFunctionInternalImports};
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::members::NoMappingMembers;

/// Checks wire DTOs. Field defaults and Optional are legitimate at the
/// wire boundary, so only containers, placeholders, and behavior are
/// policed here.
#[must_use]
pub fn dto_checker() -> Checker {
    Checker::new("dto")
        .for_layer(Layer::Dtos)
        .with_file_group(
            "imports",
            vec![
                Box::new(NoFunctionInternalImports),
                Box::new(ForbiddenLayerImports),
            ],
        )
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
        .with_class_group(
            "fields",
            vec![Box::new(NoBareContainers), Box::new(NoGenericPlaceholders)],
        )
        .with_class_group("members", vec![Box::new(NoMappingMembers)])
        .with_class_group("logic", vec![Box::new(NoBusinessLogic)])
}
