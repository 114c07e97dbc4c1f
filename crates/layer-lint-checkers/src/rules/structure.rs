//! Module directory structure: every module carries all seven layer
//! directories, correctly named, and nothing else that looks layered.

use std::path::{Path, PathBuf};

use layer_lint_core::{CheckContext, FileRule, Layer, Violation};
use layer_lint_py::PyModule;

use super::violation;

/// Module root for a file: the ancestor directly under `modules/`.
fn module_root(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .find(|a| {
            a.parent()
                .and_then(Path::file_name)
                .is_some_and(|n| n == "modules")
        })
        .map(Path::to_path_buf)
}

/// Checks that a module directory carries exactly the seven layer
/// directories. Reported once per module via the memo, with an ordered
/// create-plan for the missing ones.
pub struct ModuleStructure;

impl FileRule for ModuleStructure {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn check(&self, ctx: &CheckContext<'_>, _module: &PyModule) -> Vec<Violation> {
        let Some(root) = module_root(ctx.file.path) else {
            return Vec::new();
        };
        if !ctx.memo.first_visit(&root.display().to_string()) {
            return Vec::new();
        }

        let mut out = Vec::new();
        let missing: Vec<&str> = Layer::ALL
            .iter()
            .map(|l| l.dir_name())
            .filter(|d| !root.join(d).is_dir())
            .collect();
        if !missing.is_empty() {
            out.push(violation(
                ctx,
                "LLD01",
                self.name(),
                0,
                format!(
                    "module `{}` is missing layer directories; create in order: {}",
                    root.file_name()
                        .map(|n| n.to_string_lossy())
                        .unwrap_or_default(),
                    missing.join(", ")
                ),
            ));
        }

        if let Ok(entries) = std::fs::read_dir(&root) {
            let mut strays: Vec<String> = entries
                .flatten()
                .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|n| n.starts_with("_0") && Layer::from_dir_name(n).is_none())
                .collect();
            strays.sort();
            for stray in strays {
                out.push(violation(
                    ctx,
                    "LLD02",
                    self.name(),
                    0,
                    format!(
                        "directory `{stray}` in module `{}` is not a layer directory",
                        root.file_name()
                            .map(|n| n.to_string_lossy())
                            .unwrap_or_default()
                    ),
                ));
            }
        }
        out
    }
}
