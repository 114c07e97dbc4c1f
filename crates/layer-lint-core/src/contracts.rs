//! Precomputed index of contract interfaces.
//!
//! Signature-matching rules need the `I*` declarations from the sibling
//! `_01_contracts` directory. The orchestration layer builds this index once
//! per run and hands it to every checker as an immutable map, instead of
//! each rule walking the filesystem.

use std::collections::HashMap;
use std::path::PathBuf;

use layer_lint_py::{Param, PyClass, PyFunction};

/// Signature of one interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    /// Method name.
    pub name: String,
    /// Line of the `def` in the contract file.
    pub line: usize,
    /// Parameters excluding `self`.
    pub params: Vec<Param>,
    /// Return annotation source text.
    pub returns: Option<String>,
}

impl MethodSig {
    /// Builds a signature from an extracted interface method.
    #[must_use]
    pub fn from_function(function: &PyFunction) -> Self {
        Self {
            name: function.name.clone(),
            line: function.line,
            params: function.logical_params().to_vec(),
            returns: function.returns.clone(),
        }
    }
}

/// One interface parsed from a contracts file.
#[derive(Debug, Clone)]
pub struct ContractInterface {
    /// Interface name, e.g. `ILogWriter`.
    pub name: String,
    /// Contract file the interface was parsed from.
    pub file: PathBuf,
    /// Line of the `class`.
    pub line: usize,
    /// Non-dunder method signatures in declaration order.
    pub methods: Vec<MethodSig>,
}

impl ContractInterface {
    /// Builds an interface record from an extracted class.
    #[must_use]
    pub fn from_class(class: &PyClass, file: PathBuf) -> Self {
        Self {
            name: class.name.clone(),
            file,
            line: class.line,
            methods: class
                .methods
                .iter()
                .filter(|m| !layer_lint_py::helper::is_dunder(&m.name))
                .map(MethodSig::from_function)
                .collect(),
        }
    }

    /// Looks up a method signature by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSig> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Map from interface name to its parsed signatures.
///
/// Empty when the module has no `_01_contracts` directory; signature rules
/// then silently skip.
#[derive(Debug, Clone, Default)]
pub struct ContractIndex {
    interfaces: HashMap<String, ContractInterface>,
}

impl ContractIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an interface, replacing any previous one with the same name.
    pub fn insert(&mut self, interface: ContractInterface) {
        self.interfaces.insert(interface.name.clone(), interface);
    }

    /// Looks up an interface by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContractInterface> {
        self.interfaces.get(name)
    }

    /// Whether the index holds any interfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Number of indexed interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }
}
