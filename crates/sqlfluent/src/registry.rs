//! Alias registry for one statement.
//!
//! The registry maps aliases to tables in registration order and carries the
//! statement's sticky error state: once any error is recorded, builders stop
//! appending fragments and `try_build` fails.

use crate::error::{QueryError, QueryResult};
use crate::ident::Ident;
use crate::table::TableRef;
use crate::trace;

/// One FROM/JOIN/INTO target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBinding {
    pub alias: String,
    pub table: TableRef,
}

impl TableBinding {
    /// Whether the alias differs from the canonical table name.
    pub fn is_aliased(&self) -> bool {
        self.alias != self.table.name
    }
}

/// Ordered alias → table mapping plus recorded errors.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bindings: Vec<TableBinding>,
    errors: Vec<QueryError>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `table` under `alias`.
    ///
    /// Returns `false` (and records the error) when the alias is invalid or
    /// already bound.
    pub fn add_table(&mut self, table: TableRef, alias: &str) -> bool {
        if let Err(e) = Ident::new(alias) {
            self.record(e);
            return false;
        }
        if self.get(alias).is_some() {
            self.record(QueryError::duplicate_alias(alias, table.name));
            return false;
        }
        self.bindings.push(TableBinding {
            alias: alias.to_string(),
            table,
        });
        true
    }

    /// Find the alias a reference to `table` should use.
    ///
    /// With a hint, the hinted binding must exist and belong to `table`.
    /// Without one, `table` must be bound exactly once.
    pub fn resolve_alias(&mut self, table: &TableRef, alias_hint: Option<&str>) -> QueryResult<String> {
        let resolved = match alias_hint {
            Some(alias) => match self.get(alias) {
                None => Err(QueryError::UnknownAlias {
                    alias: alias.to_string(),
                    table: table.name.to_string(),
                }),
                Some(b) if b.table.name != table.name => Err(QueryError::AliasTableMismatch {
                    alias: alias.to_string(),
                    table: table.name.to_string(),
                    bound: b.table.name.to_string(),
                }),
                Some(b) => Ok(b.alias.clone()),
            },
            None => {
                let mut matches = self.bindings.iter().filter(|b| b.table.name == table.name);
                match (matches.next(), matches.count()) {
                    (None, _) => Err(QueryError::UnresolvedTable {
                        table: table.name.to_string(),
                    }),
                    (Some(b), 0) => Ok(b.alias.clone()),
                    (Some(_), rest) => Err(QueryError::AmbiguousTable {
                        table: table.name.to_string(),
                        count: rest + 1,
                    }),
                }
            }
        };
        resolved.map_err(|e| self.record(e))
    }

    pub fn get(&self, alias: &str) -> Option<&TableBinding> {
        self.bindings.iter().find(|b| b.alias == alias)
    }

    pub fn bindings(&self) -> &[TableBinding] {
        &self.bindings
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[QueryError] {
        &self.errors
    }

    /// Record an error and hand it back for propagation.
    pub fn record(&mut self, err: QueryError) -> QueryError {
        trace::error_recorded(&err);
        self.errors.push(err.clone());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Car, Maker};

    fn car() -> TableRef {
        TableRef::of::<Car>()
    }

    fn maker() -> TableRef {
        TableRef::of::<Maker>()
    }

    #[test]
    fn add_and_resolve_default_alias() {
        let mut reg = Registry::new();
        assert!(reg.add_table(car(), "Car"));
        assert_eq!(reg.resolve_alias(&car(), None).unwrap(), "Car");
        assert!(!reg.has_error());
        assert!(!reg.bindings()[0].is_aliased());
    }

    #[test]
    fn duplicate_alias_is_sticky() {
        let mut reg = Registry::new();
        assert!(reg.add_table(car(), "X"));
        assert!(!reg.add_table(maker(), "X"));
        assert!(reg.has_error());
        assert_eq!(reg.errors(), &[QueryError::duplicate_alias("X", "Maker")]);
        // Later successful operations do not clear the error.
        assert!(reg.add_table(maker(), "Y"));
        assert!(reg.has_error());
    }

    #[test]
    fn empty_alias_is_rejected() {
        let mut reg = Registry::new();
        assert!(!reg.add_table(car(), ""));
        assert!(matches!(reg.errors()[0], QueryError::InvalidIdentifier(_)));
    }

    #[test]
    fn hint_must_exist_and_match_table() {
        let mut reg = Registry::new();
        reg.add_table(car(), "C");
        assert_eq!(reg.resolve_alias(&car(), Some("C")).unwrap(), "C");

        assert!(matches!(
            reg.resolve_alias(&car(), Some("Nope")),
            Err(QueryError::UnknownAlias { .. })
        ));
        assert!(matches!(
            reg.resolve_alias(&maker(), Some("C")),
            Err(QueryError::AliasTableMismatch { .. })
        ));
        assert_eq!(reg.errors().len(), 2);
    }

    #[test]
    fn missing_and_ambiguous_tables() {
        let mut reg = Registry::new();
        reg.add_table(car(), "A");
        reg.add_table(car(), "B");

        assert_eq!(
            reg.resolve_alias(&car(), None).unwrap_err(),
            QueryError::AmbiguousTable {
                table: "Car".into(),
                count: 2
            }
        );
        assert_eq!(
            reg.resolve_alias(&maker(), None).unwrap_err(),
            QueryError::UnresolvedTable {
                table: "Maker".into()
            }
        );
    }
}
