//! The checker driver.
//!
//! A [`Checker`] is a named bundle of priority-grouped rules plus a file
//! selector. The driver walks the target, parses each matching file once,
//! and feeds the IR through the rule pipeline. Unparseable files produce a
//! single line-0 violation and are otherwise skipped.

use std::path::{Path, PathBuf};

use layer_lint_core::{
    run_class_groups, run_file_groups, CheckContext, CheckerReport, ClassRuleBox, ClassRuleGroup,
    ContractIndex, ExemptionRule, FileContext, FileRuleBox, FileRuleGroup, Layer, LintResult,
    Location, Memo, Severity, Violation,
};
use layer_lint_py::PythonExtractor;

/// Errors that abort a checker run outright.
///
/// Per-file problems (unreadable or unparseable files) never abort; they are
/// reported as violations instead.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// The target path cannot be accessed at all.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Collects all `.py` files under `target`, sorted for deterministic runs.
///
/// A single-file target is returned as-is. Walk errors on individual
/// entries are logged and skipped.
///
/// # Errors
///
/// Returns [`CheckerError::Io`] when `target` itself does not exist.
pub fn discover_python_files(target: &Path) -> Result<Vec<PathBuf>, CheckerError> {
    let meta = std::fs::metadata(target).map_err(|source| CheckerError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    if meta.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(target).build() {
        match entry {
            Ok(e) if e.file_type().is_some_and(|t| t.is_file()) => {
                let path = e.into_path();
                if path.extension().is_some_and(|x| x == "py") {
                    files.push(path);
                }
            }
            Ok(_) => {}
            Err(err) => tracing::warn!("skipping unreadable entry: {err}"),
        }
    }
    files.sort();
    Ok(files)
}

/// One architecture checker: a file selector plus priority-grouped rules.
pub struct Checker {
    name: &'static str,
    layer: Option<Layer>,
    file_prefix: Option<&'static str>,
    scan_all: bool,
    exemptions: ExemptionRule,
    file_groups: Vec<FileRuleGroup>,
    class_groups: Vec<ClassRuleGroup>,
}

impl Checker {
    /// Creates a checker with no selector and no rules.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            layer: None,
            file_prefix: None,
            scan_all: false,
            exemptions: ExemptionRule::new(),
            file_groups: Vec::new(),
            class_groups: Vec::new(),
        }
    }

    /// Restricts the checker to files under the given layer directory.
    #[must_use]
    pub fn for_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Restricts the checker to files whose basename starts with `prefix`.
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: &'static str) -> Self {
        self.file_prefix = Some(prefix);
        self
    }

    /// Makes the checker scan every Python file regardless of layer.
    #[must_use]
    pub fn scan_all(mut self) -> Self {
        self.scan_all = true;
        self
    }

    /// Replaces the checker's exemptions.
    #[must_use]
    pub fn with_exemptions(mut self, exemptions: ExemptionRule) -> Self {
        self.exemptions = exemptions;
        self
    }

    /// Appends a priority group of file-wide rules.
    #[must_use]
    pub fn with_file_group(mut self, name: &'static str, rules: Vec<FileRuleBox>) -> Self {
        self.file_groups.push(FileRuleGroup::new(name, rules));
        self
    }

    /// Appends a priority group of class-level rules.
    #[must_use]
    pub fn with_class_group(mut self, name: &'static str, rules: Vec<ClassRuleBox>) -> Self {
        self.class_groups.push(ClassRuleGroup::new(name, rules));
        self
    }

    /// Display name of this checker.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this checker wants the given file.
    #[must_use]
    pub fn matches_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if !name.ends_with(".py") {
            return false;
        }
        if self.scan_all {
            return true;
        }
        if let Some(layer) = self.layer {
            if Layer::from_path(path) != Some(layer) {
                return false;
            }
        }
        if let Some(prefix) = self.file_prefix {
            if name == "__init__.py" || !name.starts_with(prefix) {
                return false;
            }
        }
        true
    }

    /// Runs the checker over a pre-discovered file list.
    #[must_use]
    pub fn run_on_files(&self, files: &[PathBuf], contracts: &ContractIndex) -> LintResult {
        let extractor = PythonExtractor::new();
        let memo = Memo::new();
        let mut result = LintResult::new();

        for path in files {
            if !self.matches_file(path) {
                continue;
            }
            if self
                .exemptions
                .file_exempt(&path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default())
            {
                continue;
            }
            result.files_checked += 1;

            let source = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(err) => {
                    let file = FileContext::new(path, "");
                    result.violations.push(file_failure(
                        &file,
                        format!("cannot read file: {err}"),
                    ));
                    continue;
                }
            };
            let file = FileContext::new(path, &source);

            let module = match extractor.parse(&source) {
                Ok(m) => m,
                Err(err) => {
                    result.violations.push(file_failure(&file, err.to_string()));
                    continue;
                }
            };

            tracing::debug!("{}: checking {}", self.name, file.relative_path.display());
            let ctx = CheckContext {
                file,
                contracts,
                exemptions: &self.exemptions,
                memo: &memo,
            };
            let mut violations = Vec::new();
            run_file_groups(&self.file_groups, &ctx, &module, &mut violations);
            for class in &module.classes {
                run_class_groups(&self.class_groups, &ctx, class, &module, &mut violations);
            }
            result.violations.extend(violations);
        }

        result.sort();
        result
    }

    /// Discovers files under `target` and runs the checker.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Io`] when the target path does not exist.
    pub fn run(&self, target: &Path, contracts: &ContractIndex) -> Result<LintResult, CheckerError> {
        let files = discover_python_files(target)?;
        Ok(self.run_on_files(&files, contracts))
    }

    /// Runs the checker and wraps the result into a status report.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Io`] when the target path does not exist.
    pub fn report(
        &self,
        files: &[PathBuf],
        contracts: &ContractIndex,
    ) -> Result<CheckerReport, CheckerError> {
        Ok(CheckerReport::new(self.name, self.run_on_files(files, contracts)))
    }
}

/// Line-0 violation for a file that cannot be read or parsed.
fn file_failure(file: &FileContext<'_>, message: String) -> Violation {
    Violation::new(
        "LL001",
        "parse",
        Severity::Error,
        Location::new(file.relative_path.clone(), 0),
        message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use layer_lint_core::FileRule;

    struct CountClasses;

    impl FileRule for CountClasses {
        fn name(&self) -> &'static str {
            "count"
        }
        fn check(
            &self,
            ctx: &CheckContext<'_>,
            module: &layer_lint_py::PyModule,
        ) -> Vec<Violation> {
            module
                .classes
                .iter()
                .map(|c| {
                    Violation::new(
                        "T000",
                        "count",
                        Severity::Error,
                        Location::new(ctx.file.relative_path.clone(), c.line),
                        format!("class {}", c.name),
                    )
                })
                .collect()
        }
    }

    #[test]
    fn driver_reports_parse_failures_on_line_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("src/modules/m/_05_impls");
        std::fs::create_dir_all(&root).expect("mkdir");
        std::fs::write(root.join("impl_bad.py"), "def broken(:\n").expect("write");

        let checker = Checker::new("impl")
            .for_layer(Layer::Impls)
            .with_file_prefix("impl_")
            .with_file_group("any", vec![Box::new(CountClasses) as FileRuleBox]);
        let result = checker
            .run(dir.path(), &ContractIndex::new())
            .expect("run failed");
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.line, 0);
    }

    #[test]
    fn selector_filters_by_layer_and_prefix() {
        let checker = Checker::new("impl")
            .for_layer(Layer::Impls)
            .with_file_prefix("impl_");
        assert!(checker.matches_file(Path::new("src/modules/a/_05_impls/impl_a.py")));
        assert!(!checker.matches_file(Path::new("src/modules/a/_05_impls/__init__.py")));
        assert!(!checker.matches_file(Path::new("src/modules/a/_04_models/impl_a.py")));
        assert!(!checker.matches_file(Path::new("src/modules/a/_05_impls/helper.py")));
    }

    #[test]
    fn scan_all_matches_everything() {
        let checker = Checker::new("comments").scan_all();
        assert!(checker.matches_file(Path::new("src/anywhere/file.py")));
        assert!(!checker.matches_file(Path::new("src/anywhere/file.rs")));
    }

    #[test]
    fn discovery_is_sorted_and_python_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.py"), "").expect("write");
        std::fs::write(dir.path().join("a.py"), "").expect("write");
        std::fs::write(dir.path().join("c.txt"), "").expect("write");
        let files = discover_python_files(dir.path()).expect("discover");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            names,
            vec![Some("a.py".to_owned()), Some("b.py".to_owned())]
        );
    }
}
