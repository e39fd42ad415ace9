//! Table references
//!
//! An `EntityPath` names a table together with the alias it is known by in a
//! statement. The same table can appear more than once under different
//! aliases, which is how self-referencing subqueries are written.

use crate::query_builder::aggregation::SelectItem;
use crate::query_builder::expr::{ColumnPath, Expr};

/// A table plus the alias used to qualify its columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityPath {
    table: String,
    alias: String,
}

impl EntityPath {
    /// Reference a table under its own name
    pub fn new(table: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            alias: table.clone(),
            table,
        }
    }

    /// Reference a table under an explicit alias
    pub fn aliased(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// True when the alias differs from the table name and must be rendered
    pub fn has_alias(&self) -> bool {
        self.alias != self.table
    }

    /// A column of this table, qualified by the alias
    pub fn column(&self, name: &str) -> Expr {
        Expr::Column(ColumnPath::qualified(self.alias.clone(), name))
    }

    /// `alias.*`
    pub fn all_columns(&self) -> SelectItem {
        SelectItem::AllOf(self.alias.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_path_defaults_alias_to_table() {
        let path = EntityPath::new("member");
        assert_eq!(path.table(), "member");
        assert_eq!(path.alias(), "member");
        assert!(!path.has_alias());
    }

    #[test]
    fn test_entity_path_column_is_qualified_by_alias() {
        let path = EntityPath::aliased("member", "member_sub");
        assert!(path.has_alias());
        assert_eq!(
            path.column("age"),
            Expr::Column(ColumnPath::qualified("member_sub", "age"))
        );
        assert_eq!(path.all_columns(), SelectItem::AllOf("member_sub".to_string()));
    }
}
