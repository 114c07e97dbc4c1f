//! # layer-lint-checkers
//!
//! The rule families and concrete checkers for the layered-architecture
//! analyzer.
//!
//! [`rules`] holds reusable rule structs grouped by family (naming,
//! signatures, control flow, conformance, ...). [`checkers`] composes them
//! into the per-layer checkers the gate runs, in order, via
//! [`checkers::all_checkers`]. [`Checker`] is the driver that walks a
//! target, parses each file once, and feeds the IR through its priority
//! groups.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;

/// Concrete checkers and the gate ordering.
pub mod checkers;
/// Contract-index construction from `_01_contracts` directories.
pub mod contracts;
/// Rule families shared across checkers.
pub mod rules;

pub use checker::{discover_python_files, Checker, CheckerError};
pub use checkers::all_checkers;
pub use contracts::build_contract_index;
