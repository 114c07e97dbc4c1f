//! Enum checker (`_01_contracts/e_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::layer_deps::LayerDependencies;
use crate::rules::naming::{ClassNaming, EnumBaseRequired, EnumMemberNaming};

/// Checks `E*` enums.
#[must_use]
pub fn enum_checker() -> Checker {
    Checker::new("enum")
        .for_layer(Layer::Contracts)
        .with_file_prefix("e_")
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
        .with_class_group("naming", vec![Box::new(ClassNaming)])
        .with_class_group("base", vec![Box::new(EnumBaseRequired)])
        .with_class_group("members", vec![Box::new(EnumMemberNaming)])
}
