use std::fmt;

/// A non-owning reference to a view, attached to the tables and columns
/// the view reads from. Ordered so dependent-view lists render stably.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewRef {
    pub schema: String,
    pub view: String,
}

impl ViewRef {
    pub fn new(schema: impl Into<String>, view: impl Into<String>) -> Self {
        ViewRef { schema: schema.into(), view: view.into() }
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\".\"{}\"", self.schema, self.view)
    }
}

/// Catalog state for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub name: String,
    pub definition: String,
    pub comment: String,
}

impl ViewState {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        ViewState { name: name.into(), definition: definition.into(), comment: String::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_ref_display() {
        let view_ref = ViewRef::new("public", "v1");
        assert_eq!(view_ref.to_string(), "\"public\".\"v1\"");
    }

    #[test]
    fn test_view_ref_ordering() {
        let mut refs = vec![ViewRef::new("public", "v2"), ViewRef::new("audit", "v1"), ViewRef::new("public", "v1")];
        refs.sort();
        assert_eq!(refs[0].schema, "audit");
        assert_eq!(refs[1], ViewRef::new("public", "v1"));
        assert_eq!(refs[2], ViewRef::new("public", "v2"));
    }
}
