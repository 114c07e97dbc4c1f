//! # layer-lint-py
//!
//! Tree-sitter based Python extraction for layer-lint.
//!
//! Parses Python source into a language-neutral IR ([`PyModule`]) that the
//! checker crates consume. Extraction is purely syntactic: annotations are
//! kept as source text and no type resolution is attempted.
//!
//! - [`PythonExtractor`] parses one file into the IR
//! - [`ir`] holds the IR records
//! - [`helper`] answers shared syntactic questions (casing, annotations,
//!   stub bodies, business-logic sniffing)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod helper;
pub mod ir;

pub use extractor::{ExtractError, PythonExtractor};
pub use ir::{
    BodyFeature, Comment, Decorator, Docstring, Feature, ImportStmt, ImportedName, Param, PyAssign,
    PyClass, PyField, PyFunction, PyModule,
};
