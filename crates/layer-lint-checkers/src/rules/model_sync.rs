//! DTO / model field synchronization.
//!
//! A `Model<Name>` and its `Dto<Name>` describe the same concept at two
//! boundaries; when their field names drift apart one of them is lying.

use std::collections::HashSet;
use std::path::PathBuf;

use layer_lint_core::{CheckContext, FileRule, Layer, Violation};
use layer_lint_py::{PyClass, PyModule, PythonExtractor};

use super::violation;

/// Sibling `_02_dtos` directory for a model file.
fn dtos_dir(ctx: &CheckContext<'_>) -> Option<PathBuf> {
    let module_dir = ctx.file.path.parent()?.parent()?;
    let dir = module_dir.join(Layer::Dtos.dir_name());
    dir.is_dir().then_some(dir)
}

fn field_names(class: &PyClass) -> HashSet<String> {
    class.fields.iter().map(|f| f.name.clone()).collect()
}

/// Compares `Model*` classes against the same-named `Dto*` classes in the
/// sibling DTO layer and reports fields missing on either side.
pub struct DtoModelFieldSync;

impl FileRule for DtoModelFieldSync {
    fn name(&self) -> &'static str {
        "model-sync"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let Some(dir) = dtos_dir(ctx) else {
            return Vec::new();
        };
        let extractor = PythonExtractor::new();
        let mut dto_classes: Vec<PyClass> = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&dir) {
            let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            paths.sort();
            for path in paths {
                if !path.extension().is_some_and(|e| e == "py") {
                    continue;
                }
                let Ok(source) = std::fs::read_to_string(&path) else {
                    continue;
                };
                if let Ok(parsed) = extractor.parse(&source) {
                    dto_classes.extend(parsed.classes);
                }
            }
        }

        let mut out = Vec::new();
        for model in &module.classes {
            let Some(concept) = model.name.strip_prefix("Model") else {
                continue;
            };
            let dto_name = format!("Dto{concept}");
            let Some(dto) = dto_classes.iter().find(|c| c.name == dto_name) else {
                continue;
            };
            let model_fields = field_names(model);
            let dto_fields = field_names(dto);
            let mut only_model: Vec<&str> = model_fields
                .difference(&dto_fields)
                .map(String::as_str)
                .collect();
            only_model.sort_unstable();
            let mut only_dto: Vec<&str> = dto_fields
                .difference(&model_fields)
                .map(String::as_str)
                .collect();
            only_dto.sort_unstable();

            if !only_model.is_empty() {
                out.push(violation(
                    ctx,
                    "LLH01",
                    self.name(),
                    model.line,
                    format!(
                        "`{}` has fields missing from `{dto_name}`: {}",
                        model.name,
                        only_model.join(", ")
                    ),
                ));
            }
            if !only_dto.is_empty() {
                out.push(violation(
                    ctx,
                    "LLH02",
                    self.name(),
                    model.line,
                    format!(
                        "`{dto_name}` has fields missing from `{}`: {}",
                        model.name,
                        only_dto.join(", ")
                    ),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_file_at;
    use super::*;

    #[test]
    fn drifted_fields_are_reported_both_ways() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = dir.path().join("src/modules/m");
        let dtos = module.join("_02_dtos");
        let models = module.join("_04_models");
        std::fs::create_dir_all(&dtos).expect("mkdir");
        std::fs::create_dir_all(&models).expect("mkdir");
        std::fs::write(
            dtos.join("dto_user.py"),
            "class DtoUser:\n    user_id: str\n    email: str\n",
        )
        .expect("write");

        let model_src = "class ModelUser:\n    user_id: str\n    password_hash: str\n";
        let file = models.join("model_user.py");
        std::fs::write(&file, model_src).expect("write");

        let out = check_file_at(&DtoModelFieldSync, &file.display().to_string(), model_src);
        assert_eq!(out.len(), 2);
        assert!(out[0].message.contains("password_hash"));
        assert!(out[1].message.contains("email"));
    }

    #[test]
    fn matching_fields_pass() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = dir.path().join("src/modules/m");
        let dtos = module.join("_02_dtos");
        let models = module.join("_04_models");
        std::fs::create_dir_all(&dtos).expect("mkdir");
        std::fs::create_dir_all(&models).expect("mkdir");
        std::fs::write(
            dtos.join("dto_user.py"),
            "class DtoUser:\n    user_id: str\n",
        )
        .expect("write");

        let model_src = "class ModelUser:\n    user_id: str\n";
        let file = models.join("model_user.py");
        std::fs::write(&file, model_src).expect("write");

        let out = check_file_at(&DtoModelFieldSync, &file.display().to_string(), model_src);
        assert!(out.is_empty());
    }
}
