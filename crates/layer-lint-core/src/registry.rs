//! Central registry of allow-lists and tunable thresholds.
//!
//! Every hard-coded list the rules consult lives here so tuning a rule never
//! means editing checker logic. Thresholds are named constants; the rules
//! that use them take them as parameters defaulting to these values.

/// Maximum abstract methods per interface.
pub const MAX_INTERFACE_METHODS: usize = 7;

/// Maximum `i_*.py` files per contracts directory.
pub const MAX_INTERFACES_PER_MODULE: usize = 10;

/// Field-set overlap ratio above which two keyed dataclasses are duplicates.
pub const DUPLICATE_FIELD_OVERLAP: f64 = 0.70;

/// Token overlap ratio above which an inline comment restates its line.
pub const COMMENT_OVERLAP_THRESHOLD: f64 = 0.70;

/// Maximum docstring length in characters.
pub const MAX_DOCSTRING_CHARS: usize = 100;

/// Maximum parameters on a route function.
pub const MAX_ROUTE_PARAMS: usize = 5;

/// Maximum parameters on an `__init__`.
pub const MAX_INIT_PARAMS: usize = 6;

/// Class-name suffixes exempt from field rules (internal config classes).
pub const SETTINGS_CLASS_SUFFIXES: &[&str] = &["Settings", "SettingsModel"];

/// Well-known third-party base classes that exempt a class from field rules.
pub const SETTINGS_BASE_TYPES: &[&str] = &[
    "BaseSettings",
    "BaseModel",
    "Protocol",
    "TypedDict",
    "NamedTuple",
];

/// Primitive annotation names accepted everywhere.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "str", "int", "float", "bool", "bytes", "None", "UUID", "datetime", "date", "time", "Decimal",
];

/// Names that may be constructed directly inside method bodies.
///
/// Everything else must arrive through `__init__` injection, except `D*` and
/// `E*` records which are data.
pub const STDLIB_CONSTRUCTIBLE: &[&str] = &[
    "str",
    "int",
    "float",
    "bool",
    "bytes",
    "list",
    "dict",
    "set",
    "tuple",
    "frozenset",
    "Decimal",
    "Path",
    "UUID",
    "datetime",
    "date",
    "time",
    "timedelta",
    "Exception",
    "ValueError",
    "TypeError",
    "KeyError",
    "RuntimeError",
    "NotImplementedError",
    "StopIteration",
    "HTTPException",
];

/// Generic data-contract placeholders that defeat concrete field typing.
pub const GENERIC_CONTRACT_PLACEHOLDERS: &[&str] =
    &["DBool", "DInt", "DString", "DFloat", "DList", "DDict"];

/// Semantic parameter names with their canonical annotation.
pub const CANONICAL_PARAM_TYPES: &[(&str, &str)] = &[
    ("log_id", "str"),
    ("user_id", "str"),
    ("news_id", "str"),
    ("session_id", "str"),
    ("page", "int"),
    ("size", "int"),
    ("limit", "int"),
    ("offset", "int"),
];

/// Key-field names that mark a dataclass as a keyed record for the
/// duplicate check.
pub const KEY_FIELD_PATTERNS: &[&str] = &["log_id", "user_id", "news_id", "session_id"];

/// (method-name pattern, action label) pairs for the action-consistency
/// rule. The first capture group is the subject; `_by_*` suffixes are folded
/// into the same action group.
pub const ACTION_PATTERNS: &[(&str, &str)] = &[
    (r"^get_([a-z0-9_]+?)(?:_by_[a-z0-9_]+)?$", "get"),
    (r"^fetch_([a-z0-9_]+?)(?:_by_[a-z0-9_]+)?$", "get"),
    (r"^list_([a-z0-9_]+?)(?:_by_[a-z0-9_]+)?$", "list"),
    (r"^create_([a-z0-9_]+)$", "create"),
    (r"^add_([a-z0-9_]+)$", "create"),
    (r"^update_([a-z0-9_]+?)(?:_by_[a-z0-9_]+)?$", "update"),
    (r"^set_([a-z0-9_]+)$", "update"),
    (r"^delete_([a-z0-9_]+?)(?:_by_[a-z0-9_]+)?$", "delete"),
    (r"^remove_([a-z0-9_]+)$", "delete"),
];

/// Decorator tails that mark a route function.
pub const ROUTE_DECORATORS: &[&str] =
    &["get", "post", "put", "delete", "patch", "route", "websocket"];

/// Module-level standalone functions allowed everywhere.
pub const STANDALONE_FUNCTION_ALLOWLIST: &[&str] = &["main"];

/// File-name prefixes exempt from the function-internal-import rule.
pub const INTERNAL_IMPORT_EXEMPT_PREFIXES: &[&str] = &["deps_", "router_"];

/// File-name prefixes exempt from the static-method rule.
pub const STATIC_METHOD_EXEMPT_PREFIXES: &[&str] = &["deps_"];

/// File-name prefixes exempt from field rules (wire-facing records).
pub const FIELD_RULE_EXEMPT_PREFIXES: &[&str] = &["dto_"];

/// (layer directory, forbidden import fragment, reason) triples.
pub const FORBIDDEN_LAYER_IMPORTS: &[(&str, &str, &str)] = &[
    (
        "_07_router",
        "sqlalchemy",
        "router layer may not import the ORM directly",
    ),
    (
        "_01_contracts",
        "fastapi",
        "contracts must not depend on the web framework",
    ),
    (
        "_01_contracts",
        "sqlalchemy",
        "contracts must not depend on the ORM",
    ),
    (
        "_02_dtos",
        "sqlalchemy",
        "DTOs must not depend on the ORM",
    ),
    (
        "_06_services",
        "sqlalchemy",
        "services must not import the ORM directly",
    ),
];

/// Comment texts that restate code regardless of token overlap.
pub const OBVIOUS_COMMENT_PATTERNS: &[&str] = &[
    "increment",
    "decrement",
    "return the result",
    "return result",
    "call the function",
    "set the value",
    "get the value",
    "initialize",
    "loop over",
    "iterate over",
    "import the module",
    "create the object",
];
