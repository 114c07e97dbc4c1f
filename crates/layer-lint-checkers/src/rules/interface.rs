//! Rules for `I*` contract interfaces.

use std::collections::HashMap;
use std::sync::LazyLock;

use layer_lint_core::{registry, CheckContext, ClassRule, FileRule, Violation};
use layer_lint_py::helper::{body_is_stub, is_abstract_method, is_dunder};
use layer_lint_py::{PyClass, PyFunction, PyModule};
use regex::Regex;

use super::violation;

/// Interfaces stay small: at most N abstract methods.
pub struct InterfaceMethodCount {
    /// Maximum non-dunder methods per interface.
    pub max_methods: usize,
}

impl Default for InterfaceMethodCount {
    fn default() -> Self {
        Self {
            max_methods: registry::MAX_INTERFACE_METHODS,
        }
    }
}

impl ClassRule for InterfaceMethodCount {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let count = class
            .methods
            .iter()
            .filter(|m| !is_dunder(&m.name))
            .count();
        if count <= self.max_methods {
            return Vec::new();
        }
        vec![violation(
            ctx,
            "LLA01",
            self.name(),
            class.line,
            format!(
                "interface `{}` declares {count} methods; split it, method count must be ≤ {}",
                class.name, self.max_methods
            ),
        )]
    }
}

/// Every interface method is an `@abstractmethod` stub.
pub struct AbstractMethodMarkers;

impl ClassRule for AbstractMethodMarkers {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for method in &class.methods {
            if is_dunder(&method.name) {
                continue;
            }
            if !is_abstract_method(method) {
                out.push(violation(
                    ctx,
                    "LLA02",
                    self.name(),
                    method.line,
                    format!(
                        "interface method `{}.{}` must be decorated @abstractmethod",
                        class.name, method.name
                    ),
                ));
            } else if !body_is_stub(method) {
                out.push(violation(
                    ctx,
                    "LLA03",
                    self.name(),
                    method.line,
                    format!(
                        "interface method `{}.{}` must have a stub body",
                        class.name, method.name
                    ),
                ));
            }
        }
        out
    }
}

/// A contracts directory with too many interface files wants submodules.
///
/// Reported once per directory via the memo; the suggestion groups file
/// stems by their first name token.
pub struct InterfaceFileCount {
    /// Maximum `i_*.py` files per contracts directory.
    pub max_files: usize,
}

impl Default for InterfaceFileCount {
    fn default() -> Self {
        Self {
            max_files: registry::MAX_INTERFACES_PER_MODULE,
        }
    }
}

impl FileRule for InterfaceFileCount {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn check(&self, ctx: &CheckContext<'_>, _module: &PyModule) -> Vec<Violation> {
        let Some(dir) = ctx.file.path.parent() else {
            return Vec::new();
        };
        if !ctx.memo.first_visit(&dir.display().to_string()) {
            return Vec::new();
        }
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let stems: Vec<String> = entries
            .flatten()
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n.starts_with("i_") && n.ends_with(".py"))
            .map(|n| n.trim_end_matches(".py").trim_start_matches("i_").to_owned())
            .collect();
        if stems.len() <= self.max_files {
            return Vec::new();
        }

        let mut groups: HashMap<&str, usize> = HashMap::new();
        for stem in &stems {
            let token = stem.split('_').next().unwrap_or(stem);
            *groups.entry(token).or_insert(0) += 1;
        }
        let mut suggestions: Vec<&str> = groups
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(token, _)| *token)
            .collect();
        suggestions.sort_unstable();

        let hint = if suggestions.is_empty() {
            String::new()
        } else {
            format!(" (candidate submodules: {})", suggestions.join(", "))
        };
        vec![violation(
            ctx,
            "LLA04",
            self.name(),
            0,
            format!(
                "contracts directory holds {} interface files, more than {}; split the module{hint}",
                stems.len(),
                self.max_files
            ),
        )]
    }
}

/// The same parameter name must mean the same type across all interfaces in
/// a file, and registry-known names must use their canonical type.
pub struct ParamTypeConsistency;

impl FileRule for ParamTypeConsistency {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut seen: HashMap<&str, (&str, &str)> = HashMap::new();

        for class in &module.classes {
            for method in &class.methods {
                for param in method.logical_params() {
                    let Some(ann) = param.annotation.as_deref() else {
                        continue;
                    };
                    if let Some((_, canonical)) = registry::CANONICAL_PARAM_TYPES
                        .iter()
                        .find(|(name, _)| *name == param.name)
                    {
                        if ann != *canonical {
                            out.push(violation(
                                ctx,
                                "LLA05",
                                self.name(),
                                param.line,
                                format!(
                                    "parameter `{}` is `{ann}` in `{}.{}` but is canonically `{canonical}`",
                                    param.name, class.name, method.name
                                ),
                            ));
                            continue;
                        }
                    }
                    match seen.get(param.name.as_str()) {
                        None => {
                            seen.insert(&param.name, (ann, &method.name));
                        }
                        Some((first_ann, first_method)) if *first_ann != ann => {
                            out.push(violation(
                                ctx,
                                "LLA06",
                                self.name(),
                                param.line,
                                format!(
                                    "parameter `{}` is `{ann}` in `{}.{}` but `{first_ann}` in `{first_method}`",
                                    param.name, class.name, method.name
                                ),
                            ));
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        out
    }
}

static ACTION_REGEXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    registry::ACTION_PATTERNS
        .iter()
        .filter_map(|(pattern, action)| Regex::new(pattern).ok().map(|re| (re, *action)))
        .collect()
});

fn classify_action(method: &str) -> Option<(&'static str, String)> {
    ACTION_REGEXES.iter().find_map(|(re, action)| {
        re.captures(method)
            .and_then(|c| c.get(1))
            .map(|m| (*action, m.as_str().to_owned()))
    })
}

fn param_shape(method: &PyFunction) -> String {
    method
        .logical_params()
        .iter()
        .map(|p| {
            format!(
                "{}: {}",
                p.name,
                p.annotation.as_deref().unwrap_or("<none>")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Methods naming the same action on the same subject must agree on their
/// parameters, `_by_*` variants included.
pub struct ActionConsistency;

impl FileRule for ActionConsistency {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut shapes: HashMap<(&'static str, String), (String, String)> = HashMap::new();

        for class in &module.classes {
            for method in &class.methods {
                let Some((action, subject)) = classify_action(&method.name) else {
                    continue;
                };
                let shape = param_shape(method);
                match shapes.get(&(action, subject.clone())) {
                    None => {
                        shapes.insert((action, subject), (shape, method.name.clone()));
                    }
                    Some((first_shape, first_method)) if *first_shape != shape => {
                        out.push(violation(
                            ctx,
                            "LLA07",
                            self.name(),
                            method.line,
                            format!(
                                "`{}` takes ({shape}) but `{first_method}` takes ({first_shape}); same action, same parameters",
                                method.name
                            ),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
        out
    }
}
