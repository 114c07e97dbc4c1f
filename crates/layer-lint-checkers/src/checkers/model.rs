//! ORM model checker (`_04_models/model_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::imports::NoFunctionInternalImports;
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::members::NoMappingMembers;
use crate::rules::model_sync::DtoModelFieldSync;
use crate::rules::naming::{ClassNaming, FileNaming};

/// Checks `Model*` ORM classes, including field sync against the DTOs.
#[must_use]
pub fn model_checker() -> Checker {
    Checker::new("model")
        .for_layer(Layer::Models)
        .with_file_prefix("model_")
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
        .with_file_group("dto-sync", vec![Box::new(DtoModelFieldSync)])
        .with_class_group("naming", vec![Box::new(ClassNaming)])
        .with_class_group("members", vec![Box::new(NoMappingMembers)])
}
