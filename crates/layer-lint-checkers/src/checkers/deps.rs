//! Dependency-wiring checker (`_07_router/deps_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::functions::DepsProviderNaming;
use crate::rules::imports::ForbiddenLayerImports;
use crate::rules::layer_deps::LayerDependencies;

/// Checks injection providers. Function-internal imports are allowed here
/// (providers import lazily to break startup cycles), so that rule is
/// deliberately absent.
#[must_use]
pub fn deps_checker() -> Checker {
    Checker::new("deps")
        .for_layer(Layer::Router)
        .with_file_prefix("deps_")
        .with_file_group("providers", vec![Box::new(DepsProviderNaming)])
        .with_file_group("imports", vec![Box::new(ForbiddenLayerImports)])
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
}
