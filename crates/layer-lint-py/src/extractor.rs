//! Python source extraction using Tree-sitter.
//!
//! Parses a file once and lowers it into the [`PyModule`] IR. Extraction is
//! purely syntactic: annotations, defaults, and callee paths are recorded as
//! source text.

use tree_sitter::{Language, Node, Parser};

use crate::ir::{
    BodyFeature, Comment, Decorator, Docstring, Feature, ImportStmt, ImportedName, Param, PyAssign,
    PyClass, PyField, PyFunction, PyModule,
};

/// Errors produced while extracting a source file.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load python grammar: {0}")]
    Language(String),
    /// The file does not parse as Python.
    #[error("syntax error near line {line}")]
    Parse {
        /// Line of the first error node (1-indexed, 0 when unknown).
        line: usize,
    },
}

/// Extracts the [`PyModule`] IR from Python source.
pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Parses `source` and lowers it into the IR.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Parse`] when the file contains syntax errors.
    pub fn parse(&self, source: &str) -> Result<PyModule, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language(e.to_string()))?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or(ExtractError::Parse { line: 0 })?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(ExtractError::Parse {
                line: first_error_line(&root),
            });
        }

        let mut module = PyModule::default();

        let mut cursor = root.walk();
        let children: Vec<Node<'_>> = root.children(&mut cursor).collect();
        let mut saw_statement = false;

        for node in &children {
            match node.kind() {
                "comment" => {}
                "expression_statement" => {
                    if let Some(stmt) = node.named_child(0) {
                        match stmt.kind() {
                            "string" if !saw_statement => {
                                module.docstring = Some(docstring_of(&stmt, src));
                            }
                            "assignment" => {
                                collect_module_assignment(&stmt, src, &mut module);
                            }
                            _ => {}
                        }
                    }
                    saw_statement = true;
                }
                "import_statement" | "import_from_statement" => {
                    if let Some(imp) = extract_import(node, src) {
                        module.imports.push(imp);
                    }
                    saw_statement = true;
                }
                "class_definition" => {
                    module.classes.push(extract_class(node, src, &[]));
                    saw_statement = true;
                }
                "function_definition" => {
                    module.functions.push(extract_function(node, src, &[]));
                    saw_statement = true;
                }
                "decorated_definition" => {
                    extract_decorated(node, src, &mut module);
                    saw_statement = true;
                }
                _ => saw_statement = true,
            }
        }

        collect_comments(&root, src, &mut module.comments);
        Ok(module)
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
}

fn line_of(node: &Node<'_>) -> usize {
    node.start_position().row + 1
}

fn first_error_line(root: &Node<'_>) -> usize {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return line_of(&node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }
    0
}

fn collect_comments(root: &Node<'_>, src: &[u8], out: &mut Vec<Comment>) {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.kind() == "comment" {
            out.push(Comment {
                line: line_of(&node),
                text: text(&node, src).trim_start_matches('#').trim().to_owned(),
            });
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }
    out.sort_by_key(|c| c.line);
}

/// Strips quote delimiters from a string node, keeping inner text.
fn docstring_of(node: &Node<'_>, src: &[u8]) -> Docstring {
    let mut parts = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "string_content" {
            parts.push(text(&child, src).to_owned());
        }
    }
    let joined = if parts.is_empty() {
        text(node, src)
            .trim_matches(|c| c == '"' || c == '\'')
            .to_owned()
    } else {
        parts.join("")
    };
    Docstring {
        line: line_of(node),
        text: joined.trim().to_owned(),
    }
}

fn collect_module_assignment(node: &Node<'_>, src: &[u8], module: &mut PyModule) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    module.assignments.push(PyAssign {
        line: line_of(node),
        target: text(&left, src).to_owned(),
        value: node
            .child_by_field_name("right")
            .map(|r| text(&r, src).to_owned()),
    });
}

fn extract_import(node: &Node<'_>, src: &[u8]) -> Option<ImportStmt> {
    let line = line_of(node);

    if node.kind() == "import_statement" {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "dotted_name" => names.push(ImportedName {
                    name: text(&child, src).to_owned(),
                    alias: None,
                }),
                "aliased_import" => {
                    let name = child.child_by_field_name("name")?;
                    names.push(ImportedName {
                        name: text(&name, src).to_owned(),
                        alias: child
                            .child_by_field_name("alias")
                            .map(|a| text(&a, src).to_owned()),
                    });
                }
                _ => {}
            }
        }
        return Some(ImportStmt {
            line,
            module: String::new(),
            names,
            relative_level: 0,
            is_from: false,
            is_wildcard: false,
        });
    }

    // import_from_statement
    let mut module = String::new();
    let mut relative_level = 0;
    if let Some(module_node) = node.child_by_field_name("module_name") {
        match module_node.kind() {
            "dotted_name" => module = text(&module_node, src).to_owned(),
            "relative_import" => {
                let mut cursor = module_node.walk();
                for child in module_node.children(&mut cursor) {
                    match child.kind() {
                        "import_prefix" => relative_level = text(&child, src).len(),
                        "dotted_name" => module = text(&child, src).to_owned(),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    let mut names = Vec::new();
    let mut is_wildcard = false;
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        match child.kind() {
            "dotted_name" => names.push(ImportedName {
                name: text(&child, src).to_owned(),
                alias: None,
            }),
            "aliased_import" => {
                if let Some(name) = child.child_by_field_name("name") {
                    names.push(ImportedName {
                        name: text(&name, src).to_owned(),
                        alias: child
                            .child_by_field_name("alias")
                            .map(|a| text(&a, src).to_owned()),
                    });
                }
            }
            _ => {}
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "wildcard_import" {
            is_wildcard = true;
        }
    }

    Some(ImportStmt {
        line,
        module,
        names,
        relative_level,
        is_from: true,
        is_wildcard,
    })
}

fn extract_decorators(nodes: &[Node<'_>], src: &[u8]) -> Vec<Decorator> {
    nodes
        .iter()
        .map(|d| {
            let expr = d.named_child(0);
            let (name, args) = match expr {
                Some(e) if e.kind() == "call" => (
                    e.child_by_field_name("function")
                        .map_or_else(|| text(&e, src).to_owned(), |f| text(&f, src).to_owned()),
                    e.child_by_field_name("arguments")
                        .map(|a| text(&a, src).to_owned()),
                ),
                Some(e) => (text(&e, src).to_owned(), None),
                None => (text(d, src).trim_start_matches('@').to_owned(), None),
            };
            Decorator {
                line: line_of(d),
                name,
                args,
            }
        })
        .collect()
}

fn extract_decorated(node: &Node<'_>, src: &[u8], module: &mut PyModule) {
    let mut decorator_nodes = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "decorator" {
            decorator_nodes.push(child);
        }
    }
    let Some(definition) = node.child_by_field_name("definition") else {
        return;
    };
    match definition.kind() {
        "class_definition" => module
            .classes
            .push(extract_class(&definition, src, &decorator_nodes)),
        "function_definition" => module
            .functions
            .push(extract_function(&definition, src, &decorator_nodes)),
        _ => {}
    }
}

fn extract_class(node: &Node<'_>, src: &[u8], decorator_nodes: &[Node<'_>]) -> PyClass {
    let name = node
        .child_by_field_name("name")
        .map_or_else(String::new, |n| text(&n, src).to_owned());

    let mut bases = Vec::new();
    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        let mut cursor = superclasses.walk();
        for child in superclasses.named_children(&mut cursor) {
            if child.kind() != "keyword_argument" && child.kind() != "comment" {
                bases.push(text(&child, src).to_owned());
            }
        }
    }

    let mut class = PyClass {
        line: line_of(node),
        name,
        bases,
        decorators: extract_decorators(decorator_nodes, src),
        docstring: None,
        fields: Vec::new(),
        class_vars: Vec::new(),
        methods: Vec::new(),
    };

    let Some(body) = node.child_by_field_name("body") else {
        return class;
    };

    let mut saw_statement = false;
    let mut cursor = body.walk();
    for stmt in body.named_children(&mut cursor) {
        match stmt.kind() {
            "comment" => {}
            "expression_statement" => {
                if let Some(inner) = stmt.named_child(0) {
                    match inner.kind() {
                        "string" if !saw_statement => {
                            class.docstring = Some(docstring_of(&inner, src));
                        }
                        "assignment" => collect_class_assignment(&inner, src, &mut class),
                        _ => {}
                    }
                }
                saw_statement = true;
            }
            "function_definition" => {
                class.methods.push(extract_function(&stmt, src, &[]));
                saw_statement = true;
            }
            "decorated_definition" => {
                let mut decos = Vec::new();
                let mut dc = stmt.walk();
                for child in stmt.children(&mut dc) {
                    if child.kind() == "decorator" {
                        decos.push(child);
                    }
                }
                if let Some(def) = stmt.child_by_field_name("definition") {
                    if def.kind() == "function_definition" {
                        class.methods.push(extract_function(&def, src, &decos));
                    }
                }
                saw_statement = true;
            }
            _ => saw_statement = true,
        }
    }

    class
}

fn collect_class_assignment(node: &Node<'_>, src: &[u8], class: &mut PyClass) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    let default = node
        .child_by_field_name("right")
        .map(|r| text(&r, src).to_owned());

    if let Some(annotation) = node.child_by_field_name("type") {
        class.fields.push(PyField {
            line: line_of(node),
            name: text(&left, src).to_owned(),
            annotation: text(&annotation, src).to_owned(),
            default,
        });
    } else {
        class.class_vars.push(PyAssign {
            line: line_of(node),
            target: text(&left, src).to_owned(),
            value: default,
        });
    }
}

fn extract_function(node: &Node<'_>, src: &[u8], decorator_nodes: &[Node<'_>]) -> PyFunction {
    let name = node
        .child_by_field_name("name")
        .map_or_else(String::new, |n| text(&n, src).to_owned());

    let mut is_async = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "async" {
            is_async = true;
        }
    }

    let mut function = PyFunction {
        line: line_of(node),
        name,
        decorators: extract_decorators(decorator_nodes, src),
        params: Vec::new(),
        returns: node
            .child_by_field_name("return_type")
            .map(|r| text(&r, src).to_owned()),
        docstring: None,
        body: Vec::new(),
        is_async,
        has_star_args: false,
        has_kw_args: false,
    };

    if let Some(parameters) = node.child_by_field_name("parameters") {
        extract_params(&parameters, src, &mut function);
    }

    if let Some(body) = node.child_by_field_name("body") {
        if let Some(first) = body.named_child(0) {
            if first.kind() == "expression_statement" {
                if let Some(inner) = first.named_child(0) {
                    if inner.kind() == "string" {
                        function.docstring = Some(docstring_of(&inner, src));
                    }
                }
            }
        }
        walk_body(&body, src, &mut function.body, function.docstring.as_ref());
    }

    function
}

fn extract_params(parameters: &Node<'_>, src: &[u8], function: &mut PyFunction) {
    let mut cursor = parameters.walk();
    for child in parameters.named_children(&mut cursor) {
        let line = line_of(&child);
        match child.kind() {
            "identifier" => function.params.push(Param {
                line,
                name: text(&child, src).to_owned(),
                annotation: None,
                default: None,
            }),
            "typed_parameter" => {
                let inner = child.named_child(0);
                let (name, splat) = match inner {
                    Some(n) if n.kind() == "list_splat_pattern" => {
                        (splat_name(&n, src), Some(false))
                    }
                    Some(n) if n.kind() == "dictionary_splat_pattern" => {
                        (splat_name(&n, src), Some(true))
                    }
                    Some(n) => (text(&n, src).to_owned(), None),
                    None => (String::new(), None),
                };
                match splat {
                    Some(false) => function.has_star_args = true,
                    Some(true) => function.has_kw_args = true,
                    None => {}
                }
                function.params.push(Param {
                    line,
                    name,
                    annotation: child
                        .child_by_field_name("type")
                        .map(|t| text(&t, src).to_owned()),
                    default: None,
                });
            }
            "default_parameter" | "typed_default_parameter" => {
                function.params.push(Param {
                    line,
                    name: child
                        .child_by_field_name("name")
                        .map_or_else(String::new, |n| text(&n, src).to_owned()),
                    annotation: child
                        .child_by_field_name("type")
                        .map(|t| text(&t, src).to_owned()),
                    default: child
                        .child_by_field_name("value")
                        .map(|v| text(&v, src).to_owned()),
                });
            }
            "list_splat_pattern" => {
                function.has_star_args = true;
                function.params.push(Param {
                    line,
                    name: splat_name(&child, src),
                    annotation: None,
                    default: None,
                });
            }
            "dictionary_splat_pattern" => {
                function.has_kw_args = true;
                function.params.push(Param {
                    line,
                    name: splat_name(&child, src),
                    annotation: None,
                    default: None,
                });
            }
            _ => {}
        }
    }
}

fn splat_name(node: &Node<'_>, src: &[u8]) -> String {
    node.named_child(0)
        .map_or_else(|| text(node, src).to_owned(), |n| text(&n, src).to_owned())
}

/// Collects target identifier names from a loop pattern.
fn pattern_targets(node: &Node<'_>, src: &[u8]) -> Vec<String> {
    match node.kind() {
        "identifier" => vec![text(node, src).to_owned()],
        "pattern_list" | "tuple_pattern" => {
            let mut out = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                out.extend(pattern_targets(&child, src));
            }
            out
        }
        _ => vec![text(node, src).to_owned()],
    }
}

fn push(features: &mut Vec<BodyFeature>, node: &Node<'_>, feature: Feature) {
    features.push(BodyFeature {
        line: line_of(node),
        feature,
    });
}

/// Recursively records body constructs. Nested defs and classes are noted
/// but not descended into.
fn walk_body(
    node: &Node<'_>,
    src: &[u8],
    features: &mut Vec<BodyFeature>,
    docstring: Option<&Docstring>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "comment" => {}
            "function_definition" => {
                let name = child
                    .child_by_field_name("name")
                    .map_or_else(String::new, |n| text(&n, src).to_owned());
                push(features, &child, Feature::NestedFunction { name });
            }
            "class_definition" => {}
            "if_statement" => {
                push(features, &child, Feature::If);
                walk_body(&child, src, features, docstring);
            }
            "match_statement" => {
                push(features, &child, Feature::Match);
                walk_body(&child, src, features, docstring);
            }
            "for_statement" => {
                let targets = child
                    .child_by_field_name("left")
                    .map(|l| pattern_targets(&l, src))
                    .unwrap_or_default();
                push(features, &child, Feature::For { targets });
                walk_body(&child, src, features, docstring);
            }
            "while_statement" => {
                push(features, &child, Feature::While);
                walk_body(&child, src, features, docstring);
            }
            "assert_statement" => {
                push(features, &child, Feature::Assert);
                walk_body(&child, src, features, docstring);
            }
            "import_statement" | "import_from_statement" => {
                push(features, &child, Feature::Import);
            }
            "raise_statement" => {
                push(features, &child, Feature::Raise);
                walk_body(&child, src, features, docstring);
            }
            "pass_statement" => push(features, &child, Feature::Pass),
            "return_statement" => {
                push(features, &child, Feature::Return);
                walk_body(&child, src, features, docstring);
            }
            "conditional_expression" => {
                push(features, &child, Feature::Ternary);
                walk_body(&child, src, features, docstring);
            }
            "boolean_operator" => {
                if let Some(op) = child.child_by_field_name("operator") {
                    if text(&op, src) == "or" {
                        push(features, &child, Feature::OrFallback);
                    }
                }
                walk_body(&child, src, features, docstring);
            }
            "lambda" => {
                push(features, &child, Feature::Lambda);
                walk_body(&child, src, features, docstring);
            }
            "list_comprehension" | "set_comprehension" | "dictionary_comprehension"
            | "generator_expression" => {
                let mut filtered = false;
                let mut targets = Vec::new();
                let mut cc = child.walk();
                for clause in child.named_children(&mut cc) {
                    match clause.kind() {
                        "if_clause" => filtered = true,
                        "for_in_clause" => {
                            if let Some(left) = clause.child_by_field_name("left") {
                                targets.extend(pattern_targets(&left, src));
                            }
                        }
                        _ => {}
                    }
                }
                push(features, &child, Feature::Comprehension { filtered, targets });
                walk_body(&child, src, features, docstring);
            }
            "dictionary" => {
                push(features, &child, Feature::DictLiteral);
                walk_body(&child, src, features, docstring);
            }
            "call" => {
                let callee = child
                    .child_by_field_name("function")
                    .map_or_else(String::new, |f| text(&f, src).to_owned());
                let args = child
                    .child_by_field_name("arguments")
                    .map_or(0, |a| a.named_child_count());
                let tail = callee.rsplit('.').next().unwrap_or(&callee);
                if tail.chars().next().is_some_and(char::is_uppercase) {
                    push(
                        features,
                        &child,
                        Feature::Construct {
                            name: tail.to_owned(),
                        },
                    );
                } else {
                    push(features, &child, Feature::Call { callee, args });
                }
                walk_body(&child, src, features, docstring);
            }
            "assignment" => {
                if let Some(left) = child.child_by_field_name("left") {
                    push(
                        features,
                        &child,
                        Feature::Assign {
                            target: text(&left, src).to_owned(),
                        },
                    );
                }
                walk_body(&child, src, features, docstring);
            }
            "augmented_assignment" => {
                if let Some(left) = child.child_by_field_name("left") {
                    push(
                        features,
                        &child,
                        Feature::AugAssign {
                            target: text(&left, src).to_owned(),
                        },
                    );
                }
                walk_body(&child, src, features, docstring);
            }
            "string" => {
                let is_docstring =
                    docstring.is_some_and(|d| d.line == child.start_position().row + 1);
                let is_statement = child
                    .parent()
                    .is_some_and(|p| p.kind() == "expression_statement");
                if is_statement && !is_docstring {
                    push(features, &child, Feature::StringExpr);
                }
            }
            _ => walk_body(&child, src, features, docstring),
        }
    }
}
