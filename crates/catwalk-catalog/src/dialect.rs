//! Engine dialects and simulation context.
//!
//! Grammar differences between engines are handled by the parser layer;
//! what remains here are the semantic rules that change how catalog state
//! is stored and validated. Those rules are plain data so every applier
//! can stay dialect-generic.

/// The SQL engine whose semantics a walk-through simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineDialect {
    MySql,
    TiDb,
    Postgres,
}

/// Semantic rules for one engine family.
#[derive(Debug)]
pub struct DialectRules {
    /// Schema name an unqualified object resolves to. Empty for engines
    /// without real schemas (MySQL keeps a single anonymous schema).
    pub default_schema: &'static str,
    /// Whether column and index names are lowercased on storage.
    pub lowercase_keys: bool,
    /// Whether tables, views and indexes share one per-schema name space.
    pub shared_relation_namespace: bool,
    /// Index name reserved for the primary key, if any.
    pub reserved_primary_key_name: Option<&'static str>,
    /// Base types that cannot carry a DEFAULT clause.
    pub types_forbid_default: &'static [&'static str],
    /// Base types allowed to carry ON UPDATE CURRENT_TIMESTAMP.
    pub on_update_time_types: &'static [&'static str],
    /// Whether DEFAULT NULL on a NOT NULL column is rejected.
    pub reject_null_default_on_not_null: bool,
}

static MYSQL_RULES: DialectRules = DialectRules {
    default_schema: "",
    lowercase_keys: true,
    shared_relation_namespace: false,
    reserved_primary_key_name: Some("PRIMARY"),
    types_forbid_default: &[
        "tinyblob",
        "blob",
        "mediumblob",
        "longblob",
        "tinytext",
        "text",
        "mediumtext",
        "longtext",
        "json",
        "geometry",
        "geometrycollection",
        "point",
        "multipoint",
        "linestring",
        "multilinestring",
        "polygon",
        "multipolygon",
    ],
    on_update_time_types: &["datetime", "timestamp"],
    reject_null_default_on_not_null: true,
};

static POSTGRES_RULES: DialectRules = DialectRules {
    default_schema: "public",
    lowercase_keys: false,
    shared_relation_namespace: true,
    reserved_primary_key_name: None,
    types_forbid_default: &[],
    on_update_time_types: &[],
    reject_null_default_on_not_null: false,
};

impl EngineDialect {
    pub fn rules(self) -> &'static DialectRules {
        match self {
            // TiDB follows MySQL catalog semantics.
            EngineDialect::MySql | EngineDialect::TiDb => &MYSQL_RULES,
            EngineDialect::Postgres => &POSTGRES_RULES,
        }
    }

    pub fn is_postgres(self) -> bool {
        matches!(self, EngineDialect::Postgres)
    }
}

/// Per-walk-through settings threaded into every state primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkThroughContext {
    /// Strict mode errors on references to unknown objects; lenient mode
    /// fabricates incomplete placeholders and keeps going.
    pub check_integrity: bool,
    pub dialect: EngineDialect,
    /// Whether object name comparisons ignore ASCII case. Mirrors the
    /// engine's name-resolution setting, not its storage folding.
    pub case_folding: bool,
}

impl WalkThroughContext {
    pub fn new(dialect: EngineDialect, check_integrity: bool, case_folding: bool) -> Self {
        WalkThroughContext { check_integrity, dialect, case_folding }
    }

    pub fn rules(&self) -> &'static DialectRules {
        self.dialect.rules()
    }
}
