//! Language-neutral intermediate representation of a Python source file.
//!
//! Rules never touch raw Tree-sitter nodes; the extractor lowers each file
//! into these records once and every rule works on the result. Annotations
//! are kept as source text because the analyzer is deliberately syntactic.

/// A module-, class-, or function-level docstring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    /// Line number (1-indexed).
    pub line: usize,
    /// Text with the surrounding quotes stripped.
    pub text: String,
}

/// One name brought in by an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    /// Imported identifier (last path segment for plain imports).
    pub name: String,
    /// `as` alias, if present.
    pub alias: Option<String>,
}

/// An `import` or `from ... import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStmt {
    /// Line number (1-indexed).
    pub line: usize,
    /// Dotted module path after `from`, or the module itself for plain
    /// imports. Empty for `from . import x`.
    pub module: String,
    /// Names listed after `import`.
    pub names: Vec<ImportedName>,
    /// Number of leading dots for relative imports.
    pub relative_level: usize,
    /// Whether this is a `from ... import` form.
    pub is_from: bool,
    /// Whether this is a `from ... import *`.
    pub is_wildcard: bool,
}

/// A decorator attached to a function or class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    /// Line number (1-indexed).
    pub line: usize,
    /// Dotted decorator path without call arguments, e.g. `router.get`.
    pub name: String,
    /// Call argument source text, e.g. `(frozen=True)`, when the decorator
    /// is applied as a call.
    pub args: Option<String>,
}

impl Decorator {
    /// Last segment of the dotted decorator path.
    #[must_use]
    pub fn tail(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// An annotated class-level field, e.g. `log_id: str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyField {
    /// Line number (1-indexed).
    pub line: usize,
    /// Field name.
    pub name: String,
    /// Annotation source text.
    pub annotation: String,
    /// Default value source text, if present.
    pub default: Option<String>,
}

/// An un-annotated assignment (class level or module level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyAssign {
    /// Line number (1-indexed).
    pub line: usize,
    /// Target source text, e.g. `MAX_SIZE` or `self._cache`.
    pub target: String,
    /// Value source text, if a plain assignment.
    pub value: Option<String>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Line number (1-indexed).
    pub line: usize,
    /// Parameter name.
    pub name: String,
    /// Annotation source text, if present.
    pub annotation: Option<String>,
    /// Default value source text, if present.
    pub default: Option<String>,
}

/// A syntactic construct observed inside a function body.
///
/// The extractor records one entry per occurrence so control-flow rules can
/// each test for exactly one construct and report on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    /// `if` statement.
    If,
    /// `match` statement.
    Match,
    /// `for` loop; carries the loop variable names.
    For {
        /// Loop target names, one per bound variable.
        targets: Vec<String>,
    },
    /// `while` loop.
    While,
    /// Conditional expression `a if c else b`.
    Ternary,
    /// List/set/dict comprehension or generator expression.
    Comprehension {
        /// Whether the comprehension carries an `if` clause.
        filtered: bool,
        /// Loop variable names bound by the comprehension.
        targets: Vec<String>,
    },
    /// `x or y` boolean fallback.
    OrFallback,
    /// `lambda` expression.
    Lambda,
    /// `assert` statement.
    Assert,
    /// `import` executed inside the function body.
    Import,
    /// Function call; callee is the dotted source text of the target.
    Call {
        /// Dotted callee path, e.g. `self.repo.get` or `isinstance`.
        callee: String,
        /// Number of positional and keyword arguments.
        args: usize,
    },
    /// Call of an `UpperCamelCase` name, i.e. a direct construction.
    Construct {
        /// Constructed class name.
        name: String,
    },
    /// Dictionary literal.
    DictLiteral,
    /// Augmented assignment, e.g. `total += x`.
    AugAssign {
        /// Target source text.
        target: String,
    },
    /// Plain or annotated assignment.
    Assign {
        /// Target source text.
        target: String,
    },
    /// `raise` statement.
    Raise,
    /// `pass` statement.
    Pass,
    /// `return` statement.
    Return,
    /// Nested `def`.
    NestedFunction {
        /// Nested function name.
        name: String,
    },
    /// Bare string expression statement (docstrings excluded).
    StringExpr,
}

/// A [`Feature`] with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyFeature {
    /// Line number (1-indexed).
    pub line: usize,
    /// The observed construct.
    pub feature: Feature,
}

/// A function or method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyFunction {
    /// Line number of the `def` (1-indexed).
    pub line: usize,
    /// Function name.
    pub name: String,
    /// Decorators in source order.
    pub decorators: Vec<Decorator>,
    /// Parameters, including `self`/`cls` when present.
    pub params: Vec<Param>,
    /// Return annotation source text, if present.
    pub returns: Option<String>,
    /// Docstring, if the body starts with one.
    pub docstring: Option<Docstring>,
    /// Flattened body constructs in source order.
    pub body: Vec<BodyFeature>,
    /// Whether the function is `async`.
    pub is_async: bool,
    /// Whether the signature declares `*args`.
    pub has_star_args: bool,
    /// Whether the signature declares `**kwargs`.
    pub has_kw_args: bool,
}

impl PyFunction {
    /// Parameters excluding a leading `self` or `cls`.
    #[must_use]
    pub fn logical_params(&self) -> &[Param] {
        match self.params.first() {
            Some(p) if p.name == "self" || p.name == "cls" => &self.params[1..],
            _ => &self.params,
        }
    }

    /// Whether any decorator's last segment matches one of `names`.
    #[must_use]
    pub fn has_decorator(&self, names: &[&str]) -> bool {
        self.decorators.iter().any(|d| names.contains(&d.tail()))
    }
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyClass {
    /// Line number of the `class` (1-indexed).
    pub line: usize,
    /// Class name.
    pub name: String,
    /// Base class source texts in order.
    pub bases: Vec<String>,
    /// Decorators in source order.
    pub decorators: Vec<Decorator>,
    /// Docstring, if the body starts with one.
    pub docstring: Option<Docstring>,
    /// Annotated class-level fields.
    pub fields: Vec<PyField>,
    /// Un-annotated class-level assignments.
    pub class_vars: Vec<PyAssign>,
    /// Methods in source order.
    pub methods: Vec<PyFunction>,
}

impl PyClass {
    /// Whether any decorator's last segment matches one of `names`.
    #[must_use]
    pub fn has_decorator(&self, names: &[&str]) -> bool {
        self.decorators.iter().any(|d| names.contains(&d.tail()))
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&PyFunction> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A `#` comment with the marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Line number (1-indexed).
    pub line: usize,
    /// Comment text without the leading `#` and surrounding whitespace.
    pub text: String,
}

/// Result of extracting a single Python source file.
#[derive(Debug, Clone, Default)]
pub struct PyModule {
    /// Module docstring, if present.
    pub docstring: Option<Docstring>,
    /// All import statements, top level and nested alike are *not* merged:
    /// this list holds module-level imports only.
    pub imports: Vec<ImportStmt>,
    /// Top-level class definitions.
    pub classes: Vec<PyClass>,
    /// Top-level function definitions.
    pub functions: Vec<PyFunction>,
    /// Module-level assignments.
    pub assignments: Vec<PyAssign>,
    /// All comments in the file.
    pub comments: Vec<Comment>,
}

impl PyModule {
    /// Looks up a top-level class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&PyClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// All names defined at module level: classes, functions, and
    /// assignment targets. Used to validate `__init__.py` re-exports.
    #[must_use]
    pub fn defined_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        names.extend(self.classes.iter().map(|c| c.name.as_str()));
        names.extend(self.functions.iter().map(|f| f.name.as_str()));
        names.extend(self.assignments.iter().map(|a| a.target.as_str()));
        names
    }
}
