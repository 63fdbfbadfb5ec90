/// A possibly-qualified object name.
///
/// MySQL-family front-ends fill `database` for `db.table` qualifiers;
/// PostgreSQL front-ends fill `schema` (and `database` for the rare
/// `db.schema.table` form). Unqualified names leave both empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectName {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl ObjectName {
    /// An unqualified name.
    pub fn bare(name: impl Into<String>) -> Self {
        ObjectName { database: None, schema: None, name: name.into() }
    }

    /// A schema-qualified name.
    pub fn in_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        ObjectName { database: None, schema: Some(schema.into()), name: name.into() }
    }

    /// A database-qualified name (MySQL-family `db.table`).
    pub fn in_database(database: impl Into<String>, name: impl Into<String>) -> Self {
        ObjectName { database: Some(database.into()), schema: None, name: name.into() }
    }
}
