//! Rules for `D*` data records.

use std::collections::HashSet;

use layer_lint_core::{registry, CheckContext, ClassRule, FileRule, Layer, Violation};
use layer_lint_py::helper::has_business_logic;
use layer_lint_py::{PyClass, PyModule};

use super::violation;

/// Data records must live in `_01_contracts`, nowhere else.
pub struct DataclassLocation;

impl FileRule for DataclassLocation {
    fn name(&self) -> &'static str {
        "dataclass"
    }

    fn check(&self, ctx: &CheckContext<'_>, _module: &PyModule) -> Vec<Violation> {
        if ctx.file.layer == Some(Layer::Contracts) || !ctx.file.file_starts_with("d_") {
            return Vec::new();
        }
        vec![violation(
            ctx,
            "LL901",
            self.name(),
            1,
            format!(
                "data record file `{}` belongs in _01_contracts",
                ctx.file.file_name
            ),
        )]
    }
}

/// `D*` classes must be frozen dataclasses.
pub struct RequireFrozenDataclass;

impl ClassRule for RequireFrozenDataclass {
    fn name(&self) -> &'static str {
        "dataclass"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        let Some(deco) = class
            .decorators
            .iter()
            .find(|d| d.tail() == "dataclass")
        else {
            return vec![violation(
                ctx,
                "LL902",
                self.name(),
                class.line,
                format!("`{}` must be a @dataclass", class.name),
            )];
        };
        let frozen = deco
            .args
            .as_deref()
            .is_some_and(|a| a.contains("frozen=True"));
        if frozen {
            Vec::new()
        } else {
            vec![violation(
                ctx,
                "LL903",
                self.name(),
                deco.line,
                format!("`{}` must be declared @dataclass(frozen=True)", class.name),
            )]
        }
    }
}

/// Data records carry no behavior beyond dunders.
pub struct NoBusinessLogic;

impl ClassRule for NoBusinessLogic {
    fn name(&self) -> &'static str {
        "dataclass"
    }

    fn check(
        &self,
        ctx: &CheckContext<'_>,
        class: &PyClass,
        _module: &PyModule,
    ) -> Vec<Violation> {
        class
            .methods
            .iter()
            .filter(|m| has_business_logic(m))
            .map(|m| {
                violation(
                    ctx,
                    "LL904",
                    self.name(),
                    m.line,
                    format!(
                        "`{}.{}` carries business logic; records hold data only",
                        class.name, m.name
                    ),
                )
            })
            .collect()
    }
}

/// Two keyed records whose field sets overlap beyond the threshold are the
/// same concept twice; the report names both and the shared fields.
pub struct SemanticDuplicates {
    /// Field-set overlap ratio at which two records are duplicates.
    pub threshold: f64,
}

impl Default for SemanticDuplicates {
    fn default() -> Self {
        Self {
            threshold: registry::DUPLICATE_FIELD_OVERLAP,
        }
    }
}

fn key_field(class: &PyClass) -> Option<&str> {
    class
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .find(|name| registry::KEY_FIELD_PATTERNS.contains(name))
}

impl FileRule for SemanticDuplicates {
    fn name(&self) -> &'static str {
        "dataclass"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        let keyed: Vec<&PyClass> = module
            .classes
            .iter()
            .filter(|c| key_field(c).is_some())
            .collect();

        for (i, first) in keyed.iter().enumerate() {
            for second in &keyed[i + 1..] {
                if key_field(first) != key_field(second) {
                    continue;
                }
                let a: HashSet<&str> = first.fields.iter().map(|f| f.name.as_str()).collect();
                let b: HashSet<&str> = second.fields.iter().map(|f| f.name.as_str()).collect();
                let smaller = a.len().min(b.len());
                if smaller == 0 {
                    continue;
                }
                let mut shared: Vec<&str> = a.intersection(&b).copied().collect();
                shared.sort_unstable();
                #[allow(clippy::cast_precision_loss)]
                let overlap = shared.len() as f64 / smaller as f64;
                if overlap > self.threshold {
                    out.push(violation(
                        ctx,
                        "LL905",
                        self.name(),
                        first.line,
                        format!(
                            "`{}` and `{}` share fields {}; unify them into one record",
                            first.name,
                            second.name,
                            shared.join(", ")
                        ),
                    ));
                }
            }
        }
        out
    }
}
