//! The fixed seven-layer architecture model.
//!
//! Every module directory carries the same seven `_0N_*` subdirectories, in
//! layer order. The allowed-dependency table and the identifier prefix
//! conventions live here so every rule answers layer questions identically.

use std::path::Path;

/// One of the seven fixed architectural tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// `_01_contracts`: interfaces, data records, enums.
    Contracts,
    /// `_02_dtos`: wire DTOs.
    Dtos,
    /// `_03_abstracts`: abstract base classes.
    Abstracts,
    /// `_04_models`: ORM models and repositories.
    Models,
    /// `_05_impls`: concrete implementations.
    Impls,
    /// `_06_services`: public service facades.
    Services,
    /// `_07_router`: HTTP routers and deps injection.
    Router,
}

impl Layer {
    /// All layers in layer-number order.
    pub const ALL: [Self; 7] = [
        Self::Contracts,
        Self::Dtos,
        Self::Abstracts,
        Self::Models,
        Self::Impls,
        Self::Services,
        Self::Router,
    ];

    /// Exact directory name, e.g. `_05_impls`.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Contracts => "_01_contracts",
            Self::Dtos => "_02_dtos",
            Self::Abstracts => "_03_abstracts",
            Self::Models => "_04_models",
            Self::Impls => "_05_impls",
            Self::Services => "_06_services",
            Self::Router => "_07_router",
        }
    }

    /// Layer number, 1 through 7.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Self::Contracts => 1,
            Self::Dtos => 2,
            Self::Abstracts => 3,
            Self::Models => 4,
            Self::Impls => 5,
            Self::Services => 6,
            Self::Router => 7,
        }
    }

    /// Short human name, e.g. `impls`.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Contracts => "contracts",
            Self::Dtos => "dtos",
            Self::Abstracts => "abstracts",
            Self::Models => "models",
            Self::Impls => "impls",
            Self::Services => "services",
            Self::Router => "router",
        }
    }

    /// Resolves a layer from an exact directory name.
    #[must_use]
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.dir_name() == name)
    }

    /// Resolves a layer from a filesystem path by scanning its components.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.components().find_map(|c| match c {
            std::path::Component::Normal(s) => s.to_str().and_then(Self::from_dir_name),
            _ => None,
        })
    }

    /// Resolves a layer from a dotted import path by scanning its segments.
    #[must_use]
    pub fn from_import_path(dotted: &str) -> Option<Self> {
        dotted.split('.').find_map(Self::from_dir_name)
    }

    /// Layers this layer is allowed to import from.
    #[must_use]
    pub fn allowed_dependencies(self) -> &'static [Self] {
        match self {
            Self::Contracts => &[],
            Self::Dtos | Self::Abstracts | Self::Models | Self::Services => &[Self::Contracts],
            Self::Impls => &[Self::Contracts, Self::Abstracts, Self::Models],
            Self::Router => &[
                Self::Contracts,
                Self::Dtos,
                Self::Models,
                Self::Impls,
                Self::Services,
            ],
        }
    }

    /// Whether importing from `target` is allowed for this layer.
    #[must_use]
    pub fn may_depend_on(self, target: Self) -> bool {
        self == target || self.allowed_dependencies().contains(&target)
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// (file prefix, required class-name prefix) pairs.
///
/// The leading letter of a type name encodes its kind and is validated
/// wherever the type appears as an annotation.
pub const FILE_CLASS_PREFIXES: &[(&str, &str)] = &[
    ("i_", "I"),
    ("d_", "D"),
    ("e_", "E"),
    ("abstract_", "Abstract"),
    ("impl_", "Impl"),
    ("model_", "Model"),
    ("repo_", "Repo"),
];

/// Required class-name prefix for a file name, if the convention defines one.
#[must_use]
pub fn class_prefix_for_file(file_name: &str) -> Option<&'static str> {
    FILE_CLASS_PREFIXES
        .iter()
        .find(|(fp, _)| file_name.starts_with(fp))
        .map(|(_, cp)| *cp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn dir_names_are_ordered_by_number() {
        let mut prev = 0;
        for layer in Layer::ALL {
            assert!(layer.number() > prev);
            prev = layer.number();
            assert!(layer.dir_name().starts_with(&format!("_0{}", layer.number())));
        }
    }

    #[test]
    fn resolves_from_path() {
        let p = Path::new("src/modules/billing/_05_impls/impl_billing.py");
        assert_eq!(Layer::from_path(p), Some(Layer::Impls));
        assert_eq!(Layer::from_path(Path::new("src/scripts/tool.py")), None);
    }

    #[test]
    fn resolves_from_import_path() {
        assert_eq!(
            Layer::from_import_path("modules.billing._01_contracts.i_billing"),
            Some(Layer::Contracts)
        );
        assert_eq!(Layer::from_import_path("os.path"), None);
    }

    #[test]
    fn dependency_table_matches_architecture() {
        assert!(Layer::Impls.may_depend_on(Layer::Contracts));
        assert!(Layer::Impls.may_depend_on(Layer::Models));
        assert!(!Layer::Impls.may_depend_on(Layer::Router));
        assert!(!Layer::Models.may_depend_on(Layer::Impls));
        assert!(Layer::Router.may_depend_on(Layer::Services));
        assert!(!Layer::Contracts.may_depend_on(Layer::Dtos));
        // Same-layer imports are always fine.
        assert!(Layer::Models.may_depend_on(Layer::Models));
    }

    #[test]
    fn class_prefix_lookup() {
        assert_eq!(class_prefix_for_file("i_log_writer.py"), Some("I"));
        assert_eq!(class_prefix_for_file("impl_user.py"), Some("Impl"));
        assert_eq!(class_prefix_for_file("router_user.py"), None);
    }
}
