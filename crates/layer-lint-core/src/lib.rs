//! # layer-lint-core
//!
//! Core framework for the layered-architecture analyzer.
//!
//! This crate provides the foundational types shared by every checker:
//!
//! - [`Violation`], [`LintResult`], [`CheckerReport`] for findings
//! - [`Layer`] for the fixed seven-tier architecture model
//! - [`FileRule`] / [`ClassRule`] traits and the priority-group pipeline
//! - [`ContractIndex`] for precomputed interface signatures
//! - [`ExemptionRule`] and the [`registry`] of allow-lists and thresholds

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod contracts;
mod exemptions;
mod layer;
mod rule;
mod types;

/// Central allow-lists and tunable thresholds.
pub mod registry;

pub use context::{module_name_for, source_root_for, FileContext};
pub use contracts::{ContractIndex, ContractInterface, MethodSig};
pub use exemptions::ExemptionRule;
pub use layer::{class_prefix_for_file, Layer, FILE_CLASS_PREFIXES};
pub use rule::{
    run_class_groups, run_file_groups, CheckContext, ClassRule, ClassRuleBox, ClassRuleGroup,
    FileRule, FileRuleBox, FileRuleGroup, Memo, RuleGroup,
};
pub use types::{
    CheckerReport, CheckerStatus, LintResult, Location, Severity, Violation, ViolationDiagnostic,
};
