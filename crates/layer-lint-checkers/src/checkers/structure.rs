//! Module structure checker.

use crate::checker::Checker;
use crate::rules::dataclass::DataclassLocation;
use crate::rules::structure::ModuleStructure;

/// Verifies every module carries the seven layer directories and that data
/// record files sit in the contracts layer.
#[must_use]
pub fn structure_checker() -> Checker {
    Checker::new("structure")
        .scan_all()
        .with_file_group("structure", vec![Box::new(ModuleStructure)])
        .with_file_group("placement", vec![Box::new(DataclassLocation)])
}
