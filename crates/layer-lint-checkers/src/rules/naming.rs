//! Naming conventions: file names, class prefixes, member and variable
//! casing, loop variables, enum members.

use layer_lint_core::{
    class_prefix_for_file, CheckContext, ClassRule, FileRule, Violation,
};
use layer_lint_py::helper::{is_dunder, is_snake_case, is_upper_camel};
use layer_lint_py::{Feature, PyClass, PyModule};

use super::violation;

/// File basenames must be `snake_case` and carry the expected prefix.
pub struct FileNaming {
    /// Required file prefix, when the owning checker enforces one beyond
    /// its selector (e.g. the contracts checker accepts `i_`/`d_`/`e_`).
    pub allowed_prefixes: &'static [&'static str],
}

impl FileRule for FileNaming {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(&self, ctx: &CheckContext<'_>, _module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        if ctx.file.is_init_file() {
            return out;
        }
        let stem = ctx.file.file_name.trim_end_matches(".py");
        if !is_snake_case(stem) {
            out.push(violation(
                ctx,
                "LL101",
                self.name(),
                1,
                format!("file name `{}` must be snake_case", ctx.file.file_name),
            ));
        }
        if !self.allowed_prefixes.is_empty()
            && !self
                .allowed_prefixes
                .iter()
                .any(|p| ctx.file.file_name.starts_with(p))
        {
            out.push(violation(
                ctx,
                "LL102",
                self.name(),
                1,
                format!(
                    "file `{}` must start with one of: {}",
                    ctx.file.file_name,
                    self.allowed_prefixes.join(", ")
                ),
            ));
        }
        out
    }
}

/// Class names must be `UpperCamelCase` and start with the prefix the file
/// name dictates (`i_user.py` holds `I*` classes, and so on).
pub struct ClassNaming;

impl ClassRule for ClassNaming {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        if !is_upper_camel(&class.name) {
            out.push(violation(
                ctx,
                "LL103",
                self.name(),
                class.line,
                format!("class `{}` must be UpperCamelCase", class.name),
            ));
            return out;
        }
        if let Some(prefix) = class_prefix_for_file(&ctx.file.file_name) {
            let next_is_upper = class
                .name
                .strip_prefix(prefix)
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_uppercase);
            if !next_is_upper {
                out.push(violation(
                    ctx,
                    "LL104",
                    self.name(),
                    class.line,
                    format!(
                        "class `{}` in `{}` must be named `{}...`",
                        class.name, ctx.file.file_name, prefix
                    ),
                ));
            }
        }
        out
    }
}

/// Methods and their parameters must be `snake_case`; single-letter
/// parameter names are rejected.
pub struct MethodNaming;

impl ClassRule for MethodNaming {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for method in &class.methods {
            if !is_dunder(&method.name) && !is_snake_case(method.name.trim_start_matches('_')) {
                out.push(violation(
                    ctx,
                    "LL105",
                    self.name(),
                    method.line,
                    format!("method `{}` must be snake_case", method.name),
                ));
            }
            for param in method.logical_params() {
                if param.name.len() == 1 {
                    out.push(violation(
                        ctx,
                        "LL106",
                        self.name(),
                        param.line,
                        format!(
                            "parameter `{}` of `{}` needs a descriptive name",
                            param.name, method.name
                        ),
                    ));
                } else if !is_snake_case(param.name.trim_start_matches('_')) {
                    out.push(violation(
                        ctx,
                        "LL107",
                        self.name(),
                        param.line,
                        format!("parameter `{}` must be snake_case", param.name),
                    ));
                }
            }
        }
        out
    }
}

/// Loop variables (in `for` statements and comprehensions) must be longer
/// than one character. Comprehensions in test files are exempt.
pub struct LoopVariableNaming;

impl FileRule for LoopVariableNaming {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                let (targets, in_comprehension) = match &body.feature {
                    Feature::For { targets } => (targets, false),
                    Feature::Comprehension { targets, .. } => (targets, true),
                    _ => continue,
                };
                if in_comprehension && ctx.file.is_test {
                    continue;
                }
                for target in targets {
                    if target.len() == 1 && target != "_" {
                        out.push(violation(
                            ctx,
                            "LL108",
                            self.name(),
                            body.line,
                            format!("loop variable `{target}` needs a descriptive name"),
                        ));
                    }
                }
            }
        }
        out
    }
}

/// Variables and temporaries assigned inside function bodies must be
/// `snake_case`. Attribute and subscript targets are left to the member
/// rules; `_` throwaways and dunders pass.
pub struct VariableNaming;

impl FileRule for VariableNaming {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                let target = match &body.feature {
                    Feature::Assign { target } | Feature::AugAssign { target } => target,
                    _ => continue,
                };
                for name in target.split(',').map(str::trim) {
                    if name.is_empty()
                        || name.contains(['.', '[', '(', '*', ':'])
                        || name.chars().all(|c| c == '_')
                        || is_dunder(name)
                    {
                        continue;
                    }
                    if !is_snake_case(name.trim_start_matches('_')) {
                        out.push(violation(
                            ctx,
                            "LL111",
                            self.name(),
                            body.line,
                            format!(
                                "variable `{name}` in `{}` must be snake_case",
                                function.name
                            ),
                        ));
                    }
                }
            }
        }
        out
    }
}

/// Enum members must be `UPPER_SNAKE_CASE`.
pub struct EnumMemberNaming;

impl ClassRule for EnumMemberNaming {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for member in &class.class_vars {
            let upper_snake = !member.target.is_empty()
                && member
                    .target
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if !is_dunder(&member.target) && !upper_snake {
                out.push(violation(
                    ctx,
                    "LL109",
                    self.name(),
                    member.line,
                    format!(
                        "enum member `{}` of `{}` must be UPPER_SNAKE_CASE",
                        member.target, class.name
                    ),
                ));
            }
        }
        out
    }
}

/// Classes in `e_*` files must actually be enums.
pub struct EnumBaseRequired;

impl ClassRule for EnumBaseRequired {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let is_enum = class.bases.iter().any(|b| {
            let tail = b.rsplit('.').next().unwrap_or(b);
            tail == "Enum" || tail == "IntEnum" || tail == "StrEnum" || tail == "Flag"
        });
        if is_enum {
            return Vec::new();
        }
        vec![violation(
            ctx,
            "LL110",
            self.name(),
            class.line,
            format!("`{}` in an enum file must inherit from Enum", class.name),
        )]
    }
}
