//! Column definition validation shared by CREATE TABLE and the ALTER
//! TABLE column clauses.

use catwalk_ast::{ColumnDef, DefaultClause};
use catwalk_catalog::ident::base_type;
use catwalk_catalog::{ColumnState, WalkThroughError, WalkThroughContext};

/// Validate a column definition against the dialect's rules and turn it
/// into catalog state. The position ordinal is left for the table to
/// assign.
pub(crate) fn build_column_state(
    ctx: WalkThroughContext,
    table: &str,
    def: &ColumnDef,
) -> Result<ColumnState, WalkThroughError> {
    let rules = ctx.rules();
    let type_text = def.column_type.as_deref().unwrap_or_default();
    let base = base_type(type_text);

    if def.on_update_now
        && !rules.on_update_time_types.is_empty()
        && !rules.on_update_time_types.contains(&base.as_str())
    {
        let mut err = WalkThroughError::on_update_not_time_column(&def.name, type_text);
        err.line = def.line;
        return Err(err);
    }

    let nullable = if def.primary_key { Some(false) } else { def.nullable };

    let default_value = match &def.default {
        Some(DefaultClause::Null) => {
            if rules.reject_null_default_on_not_null && nullable == Some(false) {
                let mut err =
                    WalkThroughError::set_null_default_for_not_null_column(table, &def.name);
                err.line = def.line;
                return Err(err);
            }
            None
        }
        Some(DefaultClause::Expression(expression)) => {
            check_default_allowed(ctx, &def.name, &base, type_text, def.line)?;
            Some(expression.clone())
        }
        None if def.auto_increment => Some("AUTO_INCREMENT".to_string()),
        None => None,
    };

    Ok(ColumnState {
        name: def.name.clone(),
        position: 0,
        column_type: def.column_type.clone(),
        character_set: def.character_set.clone(),
        collation: def.collation.clone(),
        default_value,
        nullable,
        comment: def.comment.clone(),
        dependent_views: Default::default(),
    })
}

/// MySQL forbids defaults on BLOB, TEXT, JSON and geometry columns.
pub(crate) fn check_default_allowed(
    ctx: WalkThroughContext,
    column: &str,
    base: &str,
    column_type: &str,
    line: usize,
) -> Result<(), WalkThroughError> {
    if ctx.rules().types_forbid_default.contains(&base) {
        let mut err = WalkThroughError::invalid_column_type_for_default(column, column_type);
        err.line = line;
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catwalk_catalog::{EngineDialect, ErrorCode};

    fn mysql_ctx() -> WalkThroughContext {
        WalkThroughContext::new(EngineDialect::MySql, true, true)
    }

    fn def(name: &str, column_type: &str) -> ColumnDef {
        let mut def = ColumnDef::named(name);
        def.column_type = Some(column_type.to_string());
        def
    }

    #[test]
    fn test_blob_default_rejected() {
        let mut blob = def("payload", "blob");
        blob.default = Some(DefaultClause::Expression("'x'".to_string()));
        let err = build_column_state(mysql_ctx(), "t", &blob).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidColumnTypeForDefaultValue);
    }

    #[test]
    fn test_null_default_on_not_null_rejected() {
        let mut column = def("a", "int");
        column.nullable = Some(false);
        column.default = Some(DefaultClause::Null);
        let err = build_column_state(mysql_ctx(), "t", &column).unwrap_err();
        assert_eq!(err.code, ErrorCode::SetNullDefaultForNotNullColumn);
    }

    #[test]
    fn test_on_update_requires_time_type() {
        let mut column = def("a", "varchar(10)");
        column.on_update_now = true;
        let err = build_column_state(mysql_ctx(), "t", &column).unwrap_err();
        assert_eq!(err.code, ErrorCode::OnUpdateColumnNotDatetimeOrTimestamp);

        let mut ts = def("b", "timestamp(6)");
        ts.on_update_now = true;
        assert!(build_column_state(mysql_ctx(), "t", &ts).is_ok());
    }

    #[test]
    fn test_inline_primary_key_forces_not_null() {
        let mut column = def("id", "int");
        column.primary_key = true;
        let state = build_column_state(mysql_ctx(), "t", &column).unwrap();
        assert_eq!(state.nullable, Some(false));
    }

    #[test]
    fn test_auto_increment_recorded_as_default() {
        let mut column = def("id", "int");
        column.auto_increment = true;
        let state = build_column_state(mysql_ctx(), "t", &column).unwrap();
        assert_eq!(state.default_value.as_deref(), Some("AUTO_INCREMENT"));
    }

    #[test]
    fn test_postgres_allows_text_default() {
        let ctx = WalkThroughContext::new(EngineDialect::Postgres, true, false);
        let mut column = def("notes", "text");
        column.default = Some(DefaultClause::Expression("''".to_string()));
        assert!(build_column_state(ctx, "t", &column).is_ok());
    }
}
