//! Field qualification.
//!
//! The [`Translator`] owns a statement's [`Registry`] and turns typed field
//! references into `[alias].[field]` text.

use std::sync::Arc;

use crate::error::{QueryError, QueryResult};
use crate::ident::bracket;
use crate::registry::{Registry, TableBinding};
use crate::resolver::{FieldResolver, ProjectionResolver};
use crate::table::{FieldRef, Table, TableRef};

/// Qualifies fields against the tables bound in one statement.
#[derive(Debug, Clone)]
pub struct Translator {
    registry: Registry,
    resolver: Arc<dyn ProjectionResolver>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create a translator using [`FieldResolver`].
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(FieldResolver))
    }

    pub fn with_resolver(resolver: Arc<dyn ProjectionResolver>) -> Self {
        Self {
            registry: Registry::new(),
            resolver,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn add_table(&mut self, table: TableRef, alias: &str) -> bool {
        self.registry.add_table(table, alias)
    }

    /// Bind `T` under `alias`, or under its table name when `alias` is `None`.
    pub fn register<T: Table>(&mut self, alias: Option<&str>) -> bool {
        self.add_table(TableRef::of::<T>(), alias.unwrap_or(T::TABLE))
    }

    pub fn binding(&self, alias: &str) -> Option<&TableBinding> {
        self.registry.get(alias)
    }

    pub fn has_error(&self) -> bool {
        self.registry.has_error()
    }

    pub fn errors(&self) -> &[QueryError] {
        self.registry.errors()
    }

    /// `Err` with the first recorded error, if any.
    pub fn ensure_clean(&self) -> QueryResult<()> {
        match self.registry.errors().first() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Record `err` and return it.
    pub fn fail(&mut self, err: QueryError) -> QueryError {
        self.registry.record(err)
    }

    /// Qualify one field of `table`; `*` yields `[alias].*`.
    pub fn qualify(&mut self, table: &TableRef, field: &str, alias_hint: Option<&str>) -> QueryResult<String> {
        let alias = self.registry.resolve_alias(table, alias_hint)?;
        let mut out = bracket(&alias);
        out.push('.');
        if field == "*" {
            out.push('*');
        } else {
            out.push_str(&bracket(field));
        }
        Ok(out)
    }

    /// Resolve a projection to field names and qualify each, in order.
    pub fn qualify_projection(&mut self, field: &FieldRef) -> QueryResult<Vec<String>> {
        let names = self
            .resolver
            .resolve(&field.table, &field.projection)
            .map_err(|e| self.fail(e))?;
        names
            .iter()
            .map(|name| self.qualify(&field.table, name, field.alias_hint.as_deref()))
            .collect()
    }

    pub fn first_qualified(&mut self, field: &FieldRef) -> QueryResult<Option<String>> {
        Ok(self.qualify_projection(field)?.into_iter().next())
    }

    /// First qualified name of a projection that must name a column.
    pub fn require_first(&mut self, field: &FieldRef, context: &str) -> QueryResult<String> {
        match self.first_qualified(field)? {
            Some(name) => Ok(name),
            None => Err(self.fail(QueryError::missing_column(field.table.name, context))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SchemaResolver;
    use crate::table::{All, Column, Expression, Project};
    use crate::testing::{Car, Maker};

    #[test]
    fn qualify_default_alias() {
        let mut t = Translator::new();
        t.register::<Car>(None);
        assert_eq!(
            t.qualify(&TableRef::of::<Car>(), "Mileage", None).unwrap(),
            "[Car].[Mileage]"
        );
        assert_eq!(t.qualify(&TableRef::of::<Car>(), "*", None).unwrap(), "[Car].*");
    }

    #[test]
    fn qualify_projection_in_order() {
        let mut t = Translator::new();
        t.register::<Car>(Some("c"));
        let cols = t
            .qualify_projection(&(Car::ID, Car::PRICE).field_ref())
            .unwrap();
        assert_eq!(cols, vec!["[c].[Id]", "[c].[Price]"]);
        assert_eq!(
            t.qualify_projection(&All::<Car>::new().field_ref()).unwrap(),
            vec!["[c].*"]
        );
    }

    #[test]
    fn empty_projection_is_not_an_error() {
        let mut t = Translator::new();
        t.register::<Car>(None);
        let empty: [Column<Car>; 0] = [];
        assert_eq!(t.first_qualified(&empty.field_ref()).unwrap(), None);
        assert!(!t.has_error());

        let err = t.require_first(&empty.field_ref(), "join").unwrap_err();
        assert_eq!(err, QueryError::missing_column("Car", "join"));
        assert!(t.has_error());
    }

    #[test]
    fn unsupported_projection_is_recorded() {
        let mut t = Translator::new();
        t.register::<Car>(None);
        let expr = Expression::<Car>::new("Price * 2");
        assert!(t.qualify_projection(&expr.field_ref()).is_err());
        assert!(matches!(
            t.errors()[0],
            QueryError::UnsupportedProjection { .. }
        ));
    }

    #[test]
    fn unbound_table_is_recorded() {
        let mut t = Translator::new();
        t.register::<Car>(None);
        assert!(t.first_qualified(&Maker::NAME.field_ref()).is_err());
        assert!(t.has_error());
    }

    #[test]
    fn explicit_alias_picks_binding() {
        let mut t = Translator::new();
        t.register::<Car>(Some("a"));
        t.register::<Car>(Some("b"));
        assert_eq!(
            t.require_first(&Car::ID.of("b").field_ref(), "select").unwrap(),
            "[b].[Id]"
        );
        assert!(!t.has_error());
    }

    #[test]
    fn schema_resolver_rejects_unknown_columns() {
        let mut t = Translator::with_resolver(Arc::new(SchemaResolver));
        t.register::<Car>(None);
        let bogus: Column<Car> = Column::new("Wheels");
        assert!(t.first_qualified(&bogus.field_ref()).is_err());
        assert!(matches!(t.errors()[0], QueryError::UnknownColumn { .. }));
    }
}
