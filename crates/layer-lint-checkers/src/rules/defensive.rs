//! Defensive-coding prohibitions.
//!
//! Silent fallbacks hide broken invariants. A missing key or a `None` where
//! data was promised must surface, not be papered over with a default.

use layer_lint_core::{CheckContext, FileRule, Violation};
use layer_lint_py::{Feature, PyModule};

use super::violation;

/// Bans `value or default` fallback expressions.
pub struct NoOrFallback;

impl FileRule for NoOrFallback {
    fn name(&self) -> &'static str {
        "defensive"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                if matches!(body.feature, Feature::OrFallback) {
                    out.push(violation(
                        ctx,
                        "LL401",
                        self.name(),
                        body.line,
                        format!(
                            "`or` fallback hides missing data (in `{}`); let the absence fail",
                            function.name
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// Bans `.get(key, default)` and `getattr(obj, name, default)`: the
/// two-argument forms swallow absent keys and attributes.
pub struct NoSilentDefaults;

impl FileRule for NoSilentDefaults {
    fn name(&self) -> &'static str {
        "defensive"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                let Feature::Call { callee, args } = &body.feature else {
                    continue;
                };
                let tail = callee.rsplit('.').next().unwrap_or(callee);
                if tail == "get" && callee.contains('.') && *args == 2 {
                    out.push(violation(
                        ctx,
                        "LL402",
                        self.name(),
                        body.line,
                        format!(
                            "`.get()` with a default hides missing keys (in `{}`); index and let it raise",
                            function.name
                        ),
                    ));
                }
                if tail == "getattr" && *args == 3 {
                    out.push(violation(
                        ctx,
                        "LL403",
                        self.name(),
                        body.line,
                        format!(
                            "`getattr` with a default hides missing attributes (in `{}`)",
                            function.name
                        ),
                    ));
                }
            }
        }
        out
    }
}

/// Ambient stdlib services read hidden state; implementations must have
/// clocks and id generators injected so behavior is replayable.
pub struct NoAmbientServices;

const AMBIENT_CALLS: &[(&str, &str)] = &[
    ("datetime.now", "inject a clock"),
    ("datetime.utcnow", "inject a clock"),
    ("date.today", "inject a clock"),
    ("time.time", "inject a clock"),
    ("uuid.uuid4", "inject an id provider"),
    ("random.random", "inject a source of randomness"),
    ("random.randint", "inject a source of randomness"),
    ("os.getenv", "take configuration through __init__"),
    ("os.environ.get", "take configuration through __init__"),
];

impl FileRule for NoAmbientServices {
    fn name(&self) -> &'static str {
        "ambient-services"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            for body in &function.body {
                let Feature::Call { callee, .. } = &body.feature else {
                    continue;
                };
                let hit = AMBIENT_CALLS
                    .iter()
                    .find(|(pattern, _)| callee == pattern || callee.ends_with(&format!(".{pattern}")));
                if let Some((pattern, fix)) = hit {
                    out.push(violation(
                        ctx,
                        "LL404",
                        self.name(),
                        body.line,
                        format!("`{pattern}` called in `{}`; {fix}", function.name),
                    ));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_file_at;
    use super::*;

    const IMPLS: &str = "src/modules/m/_05_impls/impl_log.py";

    #[test]
    fn or_fallback_is_reported() {
        let out = check_file_at(
            &NoOrFallback,
            IMPLS,
            "class ImplLog:\n    def count(self, value: int) -> int:\n        return value or 0\n",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location.line, 3);
        assert!(out[0].message.contains("`or` fallback"));
    }

    #[test]
    fn dict_get_with_default_is_reported() {
        let src = "class ImplLog:\n    def pick(self, data: dict, key: str) -> str:\n        return data.get(key, \"\")\n    def pick_strict(self, data: dict, key: str) -> str:\n        return data.get(key)\n";
        let out = check_file_at(&NoSilentDefaults, IMPLS, src);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location.line, 3);
    }

    #[test]
    fn ambient_clock_is_reported() {
        let out = check_file_at(
            &NoAmbientServices,
            IMPLS,
            "class ImplLog:\n    def stamp(self) -> str:\n        return datetime.now().isoformat()\n",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("inject a clock"));
    }

    #[test]
    fn injected_clock_passes() {
        let out = check_file_at(
            &NoAmbientServices,
            IMPLS,
            "class ImplLog:\n    def stamp(self) -> str:\n        return self.clock.now().isoformat()\n",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn getattr_with_default_is_reported() {
        let out = check_file_at(
            &NoSilentDefaults,
            IMPLS,
            "class ImplLog:\n    def read(self, obj: object) -> str:\n        return getattr(obj, \"name\", \"\")\n",
        );
        assert_eq!(out.len(), 1);
    }
}
