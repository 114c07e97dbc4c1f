//! Builds the [`ContractIndex`] for a run.
//!
//! The index is computed once before any checker starts and shared by all
//! of them. Signature rules then answer interface questions with a map
//! lookup instead of re-reading contract files.

use std::path::{Path, PathBuf};

use layer_lint_core::{ContractIndex, ContractInterface, Layer};
use layer_lint_py::PythonExtractor;

/// Directories named `_01_contracts` relevant to `target`.
///
/// For a directory target this walks the tree; for a single file it climbs
/// to the nearest ancestor that contains a contracts directory. Both
/// directions are tried so a target like `.../_05_impls/impl_x.py` still
/// finds its sibling contracts.
fn contract_dirs(target: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    let walk_root = if target.is_file() {
        target.parent().map(Path::to_path_buf)
    } else {
        Some(target.to_path_buf())
    };
    if let Some(root) = walk_root {
        for entry in ignore::WalkBuilder::new(&root).build().flatten() {
            if entry.file_type().is_some_and(|t| t.is_dir())
                && entry.file_name() == Layer::Contracts.dir_name()
            {
                dirs.push(entry.into_path());
            }
        }
        for ancestor in root.ancestors() {
            let candidate = ancestor.join(Layer::Contracts.dir_name());
            if candidate.is_dir() && !dirs.contains(&candidate) {
                dirs.push(candidate);
            }
            if ancestor.file_name().is_some_and(|n| n == "src") {
                break;
            }
        }
    }

    dirs.sort();
    dirs
}

/// Parses every `i_*.py` under the contracts directories near `target`.
///
/// Missing contracts directories yield an empty index; unreadable or
/// unparseable contract files are skipped here and reported by the
/// interface checker when it visits them.
#[must_use]
pub fn build_contract_index(target: &Path) -> ContractIndex {
    let extractor = PythonExtractor::new();
    let mut index = ContractIndex::new();

    for dir in contract_dirs(target) {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            tracing::warn!("cannot read contracts directory {}", dir.display());
            continue;
        };
        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("i_") && n.ends_with(".py"))
            })
            .collect();
        paths.sort();

        for path in paths {
            let Ok(source) = std::fs::read_to_string(&path) else {
                continue;
            };
            let Ok(module) = extractor.parse(&source) else {
                tracing::debug!("skipping unparseable contract {}", path.display());
                continue;
            };
            for class in &module.classes {
                if class.name.starts_with('I') {
                    index.insert(ContractInterface::from_class(class, path.clone()));
                }
            }
        }
    }

    tracing::debug!("contract index holds {} interfaces", index.len());
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    #[test]
    fn indexes_interfaces_under_directory_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = dir.path().join("src/modules/billing");
        write(
            &module.join("_01_contracts/i_billing.py"),
            "class IBilling:\n    def charge(self, user_id: str, amount: int) -> bool:\n        pass\n",
        );
        write(&module.join("_05_impls/impl_billing.py"), "class ImplBilling:\n    pass\n");

        let index = build_contract_index(&module);
        let iface = index.get("IBilling").expect("missing interface");
        assert_eq!(iface.methods.len(), 1);
        assert_eq!(iface.methods[0].params.len(), 2);
    }

    #[test]
    fn single_file_target_finds_sibling_contracts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = dir.path().join("src/modules/auth");
        write(
            &module.join("_01_contracts/i_auth.py"),
            "class IAuth:\n    def login(self, user_id: str) -> bool:\n        pass\n",
        );
        let impl_file = module.join("_05_impls/impl_auth.py");
        write(&impl_file, "class ImplAuth(IAuth):\n    pass\n");

        let index = build_contract_index(&impl_file);
        assert!(index.get("IAuth").is_some());
    }

    #[test]
    fn missing_contracts_directory_yields_empty_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index = build_contract_index(dir.path());
        assert!(index.is_empty());
    }
}
