//! Router checker (`_07_router/router_*.py`).

use layer_lint_core::Layer;

use crate::checker::Checker;
use crate::rules::functions::{RouteDiscipline, RouterHelperNaming};
use crate::rules::imports::{ForbiddenLayerImports, NoConstantModules};
use crate::rules::layer_deps::LayerDependencies;

/// Checks route declarations.
#[must_use]
pub fn router_checker() -> Checker {
    Checker::new("router")
        .for_layer(Layer::Router)
        .with_file_prefix("router_")
        .with_file_group(
            "routes",
            vec![
                Box::new(RouteDiscipline::default()),
                Box::new(RouterHelperNaming),
            ],
        )
        .with_file_group(
            "imports",
            vec![Box::new(ForbiddenLayerImports), Box::new(NoConstantModules)],
        )
        .with_file_group("layer-deps", vec![Box::new(LayerDependencies)])
}
