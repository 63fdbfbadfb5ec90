/// Catalog state for one index or index-backed constraint.
///
/// `expressions` holds the key list in order; plain column keys are the
/// bare column name, expression keys keep their source text. An empty
/// key list is only legal on placeholders fabricated under lenient
/// integrity.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexState {
    pub name: String,
    pub expressions: Vec<String>,
    pub index_type: Option<String>,
    pub unique: bool,
    pub primary: bool,
    pub visible: bool,
    pub comment: Option<String>,
    /// Whether the index backs a table constraint. PostgreSQL renames
    /// constraints through this flag.
    pub is_constraint: bool,
}

impl IndexState {
    pub fn new(name: impl Into<String>, expressions: Vec<String>) -> Self {
        IndexState {
            name: name.into(),
            expressions,
            index_type: None,
            unique: false,
            primary: false,
            visible: true,
            comment: None,
            is_constraint: false,
        }
    }

    /// A placeholder for an index referenced before its definition was seen.
    pub fn incomplete(name: impl Into<String>) -> Self {
        IndexState::new(name, Vec::new())
    }

    /// Drop every key that is exactly the given column name. Returns true
    /// when the index has no keys left and should be dropped.
    pub fn remove_key(&mut self, column: &str) -> bool {
        self.expressions.retain(|expr| expr != column);
        self.expressions.is_empty()
    }

    /// Rewrite keys that are exactly the old column name.
    pub fn rename_key(&mut self, old: &str, new: &str) {
        for expr in &mut self.expressions {
            if expr == old {
                *expr = new.to_string();
            }
        }
    }
}
