//! Concrete checkers, one per file.
//!
//! Each constructor composes rule-family structs into the priority groups
//! for its layer. [`all_checkers`] returns them in gate order: structure
//! first, then contracts and data, then the outside-in development order,
//! then the cross-cutting scans.

mod abstracts;
mod comments;
mod dataclass;
mod deps;
mod dto;
mod enums;
mod functions;
mod imports;
mod impls;
mod interface;
mod model;
mod repository;
mod router;
mod service;
mod structure;

pub use abstracts::abstract_checker;
pub use comments::comments_checker;
pub use dataclass::dataclass_checker;
pub use deps::deps_checker;
pub use dto::dto_checker;
pub use enums::enum_checker;
pub use functions::functions_checker;
pub use imports::imports_checker;
pub use impls::impl_checker;
pub use interface::interface_checker;
pub use model::model_checker;
pub use repository::repository_checker;
pub use router::router_checker;
pub use service::service_checker;
pub use structure::structure_checker;

use crate::checker::Checker;

/// All checkers in the order the gate runs them.
#[must_use]
pub fn all_checkers() -> Vec<Checker> {
    vec![
        structure_checker(),
        interface_checker(),
        dataclass_checker(),
        enum_checker(),
        dto_checker(),
        router_checker(),
        service_checker(),
        repository_checker(),
        model_checker(),
        impl_checker(),
        abstract_checker(),
        deps_checker(),
        imports_checker(),
        functions_checker(),
        comments_checker(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_order_is_stable() {
        let checkers = all_checkers();
        let names: Vec<&str> = checkers.iter().map(Checker::name).collect();
        assert_eq!(
            names,
            vec![
                "structure",
                "interface",
                "dataclass",
                "enum",
                "dto",
                "router",
                "service",
                "repository",
                "model",
                "impl",
                "abstract",
                "deps",
                "imports",
                "functions",
                "comments",
            ]
        );
    }
}
