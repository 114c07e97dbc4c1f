//! Data record checker (`_01_contracts/d_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::dataclass::{NoBusinessLogic, RequireFrozenDataclass, SemanticDuplicates};
use crate::rules::fields::{
    NoBareContainers, NoDefaultValues, NoGenericPlaceholders, NoOptionalFields,
};
use crate::rules::imports::NoFunctionInternalImports;
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::members::{NoClassConstants, NoMappingMembers, NoPrivateMembers};
use crate::rules::naming::{ClassNaming, FileNaming};

/// Checks `D*` frozen dataclasses.
#[must_use]
pub fn dataclass_checker() -> Checker {
    Checker::new("dataclass")
        .for_layer(Layer::Contracts)
        .with_file_prefix("d_")
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
        .with_file_group("duplicates", vec![Box::new(SemanticDuplicates::default())])
        .with_class_group("naming", vec![Box::new(ClassNaming)])
        .with_class_group("form", vec![Box::new(RequireFrozenDataclass)])
        .with_class_group(
            "fields",
            vec![
                Box::new(NoOptionalFields),
                Box::new(NoDefaultValues),
                Box::new(NoBareContainers),
                Box::new(NoGenericPlaceholders),
            ],
        )
        .with_class_group(
            "members",
            vec![
                Box::new(NoPrivateMembers),
                Box::new(NoClassConstants),
                Box::new(NoMappingMembers),
            ],
        )
        .with_class_group("logic", vec![Box::new(NoBusinessLogic)])
}
