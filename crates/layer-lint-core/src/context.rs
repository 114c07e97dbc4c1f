//! Per-file context handed to rules.

use std::path::{Path, PathBuf};

use crate::layer::Layer;

/// Finds the nearest ancestor directory named `src`.
///
/// Reported paths are relativized against it so output is stable across
/// machines.
#[must_use]
pub fn source_root_for(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .find(|a| a.file_name().is_some_and(|n| n == "src"))
        .map(Path::to_path_buf)
}

/// Extracts the module name: the path segment directly after `modules`.
#[must_use]
pub fn module_name_for(path: &Path) -> Option<String> {
    let mut components = path.components();
    while let Some(c) = components.next() {
        if matches!(c, std::path::Component::Normal(s) if s == "modules") {
            return components.next().and_then(|c| match c {
                std::path::Component::Normal(s) => s.to_str().map(str::to_owned),
                _ => None,
            });
        }
    }
    None
}

/// Context about the file currently being checked.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute (or as-given) path to the file.
    pub path: &'a Path,
    /// Raw file contents.
    pub source: &'a str,
    /// Nearest `src` ancestor, falling back to the file's parent.
    pub source_root: PathBuf,
    /// Path relative to the source root, used in every report.
    pub relative_path: PathBuf,
    /// File basename.
    pub file_name: String,
    /// Module name (segment after `modules/`), if the path has one.
    pub module_name: Option<String>,
    /// Architectural layer resolved from the path, if any.
    pub layer: Option<Layer>,
    /// Whether the file lives under a `tests` directory or is `test_*.py`.
    pub is_test: bool,
}

impl<'a> FileContext<'a> {
    /// Creates a context for one file.
    #[must_use]
    pub fn new(path: &'a Path, source: &'a str) -> Self {
        let source_root = source_root_for(path).unwrap_or_else(|| {
            tracing::warn!("no `src` ancestor above {}", path.display());
            path.parent().map_or_else(|| path.to_path_buf(), Path::to_path_buf)
        });
        let relative_path = path
            .strip_prefix(&source_root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let file_name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());

        let is_test = file_name.starts_with("test_")
            || path
                .components()
                .any(|c| matches!(c, std::path::Component::Normal(s) if s == "tests"));

        Self {
            path,
            source,
            source_root,
            relative_path,
            file_name,
            module_name: module_name_for(path),
            layer: Layer::from_path(path),
            is_test,
        }
    }

    /// Whether the file basename starts with `prefix`.
    #[must_use]
    pub fn file_starts_with(&self, prefix: &str) -> bool {
        self.file_name.starts_with(prefix)
    }

    /// Whether this is a package `__init__.py`.
    #[must_use]
    pub fn is_init_file(&self) -> bool {
        self.file_name == "__init__.py"
    }
}
