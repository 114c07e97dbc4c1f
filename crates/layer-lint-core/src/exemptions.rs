//! Pluggable skip rules for checkers.

use crate::registry;

/// Immutable record of what a checker exempts.
///
/// Constructed once per checker from [`registry`] constants; rules consult
/// it instead of carrying their own lists.
#[derive(Debug, Clone)]
pub struct ExemptionRule {
    /// File-name prefixes the checker skips entirely.
    pub exempt_file_prefixes: Vec<&'static str>,
    /// Function names allowed as module-level standalones.
    pub standalone_functions: Vec<&'static str>,
    /// Decorator tails that mark a route function.
    pub route_decorators: Vec<&'static str>,
    /// Whether dunder methods are blanket-allowed.
    pub allow_dunder_methods: bool,
    /// File prefixes for which the static-method rule is suppressed.
    pub static_method_exempt_prefixes: Vec<&'static str>,
}

impl Default for ExemptionRule {
    fn default() -> Self {
        Self {
            exempt_file_prefixes: Vec::new(),
            standalone_functions: registry::STANDALONE_FUNCTION_ALLOWLIST.to_vec(),
            route_decorators: registry::ROUTE_DECORATORS.to_vec(),
            allow_dunder_methods: true,
            static_method_exempt_prefixes: registry::STATIC_METHOD_EXEMPT_PREFIXES.to_vec(),
        }
    }
}

impl ExemptionRule {
    /// Creates the default exemption set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds file-name prefixes the checker skips.
    #[must_use]
    pub fn with_exempt_prefixes(mut self, prefixes: &[&'static str]) -> Self {
        self.exempt_file_prefixes.extend_from_slice(prefixes);
        self
    }

    /// Whether the file name is exempt from this checker.
    #[must_use]
    pub fn file_exempt(&self, file_name: &str) -> bool {
        self.exempt_file_prefixes
            .iter()
            .any(|p| file_name.starts_with(p))
    }

    /// Whether a module-level standalone function is allowed.
    #[must_use]
    pub fn standalone_allowed(&self, name: &str) -> bool {
        self.standalone_functions.contains(&name)
    }

    /// Whether the static-method rule is suppressed for this file.
    #[must_use]
    pub fn static_methods_exempt(&self, file_name: &str) -> bool {
        self.static_method_exempt_prefixes
            .iter()
            .any(|p| file_name.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_main_standalone() {
        let e = ExemptionRule::new();
        assert!(e.standalone_allowed("main"));
        assert!(!e.standalone_allowed("helper"));
    }

    #[test]
    fn file_prefix_exemption() {
        let e = ExemptionRule::new().with_exempt_prefixes(&["deps_", "d_"]);
        assert!(e.file_exempt("deps_user.py"));
        assert!(e.file_exempt("d_log.py"));
        assert!(!e.file_exempt("impl_user.py"));
    }

    #[test]
    fn static_method_exemption_from_registry() {
        let e = ExemptionRule::new();
        assert!(e.static_methods_exempt("deps_user.py"));
        assert!(!e.static_methods_exempt("impl_user.py"));
    }
}
