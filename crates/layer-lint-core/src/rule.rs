//! Rule traits and the priority-group pipeline.
//!
//! Rules are first-class values composed into ordered groups. After each
//! group runs, the driver tests whether any violation has been recorded and
//! stops if so: the highest-priority problem surfaces without noise from
//! cascading lower-priority findings.

use std::cell::RefCell;
use std::collections::HashSet;

use layer_lint_py::{PyClass, PyModule};

use crate::context::FileContext;
use crate::contracts::ContractIndex;
use crate::exemptions::ExemptionRule;
use crate::types::Violation;

/// Per-checker memoization so module-wide findings are reported once.
#[derive(Debug, Default)]
pub struct Memo {
    examined: RefCell<HashSet<String>>,
}

impl Memo {
    /// Creates an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `key` is seen, false afterwards.
    pub fn first_visit(&self, key: &str) -> bool {
        self.examined.borrow_mut().insert(key.to_owned())
    }
}

/// Everything a rule may consult while checking one file.
pub struct CheckContext<'a> {
    /// The file under inspection.
    pub file: FileContext<'a>,
    /// Contract interfaces for the target module.
    pub contracts: &'a ContractIndex,
    /// The owning checker's exemptions.
    pub exemptions: &'a ExemptionRule,
    /// Per-checker memoization.
    pub memo: &'a Memo,
}

/// A file-wide rule.
pub trait FileRule: Send + Sync {
    /// Rule category tag, e.g. `imports`.
    fn name(&self) -> &'static str;

    /// Checks the whole module and returns any violations.
    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation>;
}

/// A class-level rule.
pub trait ClassRule: Send + Sync {
    /// Rule category tag, e.g. `override`.
    fn name(&self) -> &'static str;

    /// Checks one class and returns any violations. The owning module is
    /// passed for rules that need surrounding imports.
    fn check(&self, ctx: &CheckContext<'_>, class: &PyClass, module: &PyModule) -> Vec<Violation>;
}

/// Boxed [`FileRule`].
pub type FileRuleBox = Box<dyn FileRule>;
/// Boxed [`ClassRule`].
pub type ClassRuleBox = Box<dyn ClassRule>;

/// A named priority group of rules.
pub struct RuleGroup<R: ?Sized> {
    /// Group name, used in debug logging only.
    pub name: &'static str,
    /// Rules in this group.
    pub rules: Vec<Box<R>>,
}

impl<R: ?Sized> RuleGroup<R> {
    /// Creates a group from boxed rules.
    #[must_use]
    pub fn new(name: &'static str, rules: Vec<Box<R>>) -> Self {
        Self { name, rules }
    }
}

/// Priority groups of file-wide rules.
pub type FileRuleGroup = RuleGroup<dyn FileRule>;
/// Priority groups of class-level rules.
pub type ClassRuleGroup = RuleGroup<dyn ClassRule>;

/// Runs file groups in order; stops after the first group that leaves any
/// violation recorded on `out`.
pub fn run_file_groups(
    groups: &[FileRuleGroup],
    ctx: &CheckContext<'_>,
    module: &PyModule,
    out: &mut Vec<Violation>,
) {
    for group in groups {
        for rule in &group.rules {
            out.extend(rule.check(ctx, module));
        }
        if !out.is_empty() {
            tracing::debug!(
                "stopping after group '{}' in {}",
                group.name,
                ctx.file.relative_path.display()
            );
            return;
        }
    }
}

/// Runs class groups in order for one class; same short-circuit as
/// [`run_file_groups`], scoped to violations found for this class.
pub fn run_class_groups(
    groups: &[ClassRuleGroup],
    ctx: &CheckContext<'_>,
    class: &PyClass,
    module: &PyModule,
    out: &mut Vec<Violation>,
) {
    let before = out.len();
    for group in groups {
        for rule in &group.rules {
            out.extend(rule.check(ctx, class, module));
        }
        if out.len() > before {
            tracing::debug!("stopping after group '{}' for class {}", group.name, class.name);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};
    use std::path::Path;

    struct Fires(&'static str);

    impl FileRule for Fires {
        fn name(&self) -> &'static str {
            self.0
        }
        fn check(&self, ctx: &CheckContext<'_>, _module: &PyModule) -> Vec<Violation> {
            vec![Violation::new(
                "T000",
                self.0,
                Severity::Error,
                Location::new(ctx.file.relative_path.clone(), 1),
                self.0,
            )]
        }
    }

    struct Silent;

    impl FileRule for Silent {
        fn name(&self) -> &'static str {
            "silent"
        }
        fn check(&self, _ctx: &CheckContext<'_>, _module: &PyModule) -> Vec<Violation> {
            Vec::new()
        }
    }

    fn test_ctx<'a>(
        contracts: &'a ContractIndex,
        exemptions: &'a ExemptionRule,
        memo: &'a Memo,
    ) -> CheckContext<'a> {
        CheckContext {
            file: FileContext::new(Path::new("/repo/src/modules/m/_05_impls/impl_a.py"), ""),
            contracts,
            exemptions,
            memo,
        }
    }

    #[test]
    fn groups_short_circuit_on_first_violation() {
        let contracts = ContractIndex::new();
        let exemptions = ExemptionRule::new();
        let memo = Memo::new();
        let ctx = test_ctx(&contracts, &exemptions, &memo);

        let groups = vec![
            FileRuleGroup::new("quiet", vec![Box::new(Silent) as FileRuleBox]),
            FileRuleGroup::new("first", vec![Box::new(Fires("first")) as FileRuleBox]),
            FileRuleGroup::new("second", vec![Box::new(Fires("second")) as FileRuleBox]),
        ];

        let mut out = Vec::new();
        run_file_groups(&groups, &ctx, &PyModule::default(), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rule, "first");
    }

    #[test]
    fn memo_reports_first_visit_once() {
        let memo = Memo::new();
        assert!(memo.first_visit("modules/billing"));
        assert!(!memo.first_visit("modules/billing"));
        assert!(memo.first_visit("modules/auth"));
    }
}
