//! Cross-cutting function-shape checker (every Python file).

use crate::checker::Checker;
use crate::rules::functions::{NoPrivateMethods, NoStandaloneFunctions, NoStaticMethods};
use crate::rules::naming::{LoopVariableNaming, VariableNaming};

/// Checks that behavior lives on classes: no standalone functions outside
/// the sanctioned spots, no static methods, no private methods. Loop and
/// local variable naming ride along since they apply to every function
/// body.
#[must_use]
pub fn functions_checker() -> Checker {
    Checker::new("functions")
        .scan_all()
        .with_file_group("standalone", vec![Box::new(NoStandaloneFunctions)])
        .with_file_group(
            "variables",
            vec![Box::new(LoopVariableNaming), Box::new(VariableNaming)],
        )
        .with_class_group("static", vec![Box::new(NoStaticMethods)])
        .with_class_group("private", vec![Box::new(NoPrivateMethods)])
}
