//! Projection resolution: turn a [`Projection`] into field names.

use crate::error::{QueryError, QueryResult};
use crate::table::{Projection, TableRef};
use std::fmt::Debug;

/// Resolves a declarative projection into an ordered list of field names.
///
/// `*` is returned for the wildcard. Implementations must reject shapes that
/// are not field accesses with [`QueryError::UnsupportedProjection`].
pub trait ProjectionResolver: Send + Sync + Debug {
    fn resolve(&self, table: &TableRef, projection: &Projection) -> QueryResult<Vec<String>>;
}

/// Default resolver: trusts field names as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldResolver;

impl ProjectionResolver for FieldResolver {
    fn resolve(&self, table: &TableRef, projection: &Projection) -> QueryResult<Vec<String>> {
        match projection {
            Projection::Wildcard => Ok(vec!["*".to_string()]),
            Projection::Field(name) => Ok(vec![(*name).to_string()]),
            Projection::Fields(names) => Ok(names.iter().map(|n| (*n).to_string()).collect()),
            Projection::Expression(expr) => Err(QueryError::UnsupportedProjection {
                table: table.name.to_string(),
                expression: expr.clone(),
            }),
        }
    }
}

/// Resolver that also checks names against the table's declared columns.
///
/// Tables that declare no columns are accepted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaResolver;

impl ProjectionResolver for SchemaResolver {
    fn resolve(&self, table: &TableRef, projection: &Projection) -> QueryResult<Vec<String>> {
        let names = FieldResolver.resolve(table, projection)?;
        if let Some(unknown) = names
            .iter()
            .find(|n| n.as_str() != "*" && !table.declares(n))
        {
            return Err(QueryError::UnknownColumn {
                table: table.name.to_string(),
                column: unknown.clone(),
            });
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use crate::testing::Car;

    struct Loose;
    impl Table for Loose {
        const TABLE: &'static str = "Loose";
    }

    #[test]
    fn field_resolver_shapes() {
        let car = TableRef::of::<Car>();
        assert_eq!(
            FieldResolver.resolve(&car, &Projection::Wildcard).unwrap(),
            vec!["*"]
        );
        assert_eq!(
            FieldResolver
                .resolve(&car, &Projection::Fields(vec!["Id", "Price"]))
                .unwrap(),
            vec!["Id", "Price"]
        );
        assert!(FieldResolver
            .resolve(&car, &Projection::Fields(vec![]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn field_resolver_rejects_expressions() {
        let err = FieldResolver
            .resolve(
                &TableRef::of::<Car>(),
                &Projection::Expression("Price * 2".into()),
            )
            .unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedProjection { .. }));
    }

    #[test]
    fn schema_resolver_checks_declared_columns() {
        let car = TableRef::of::<Car>();
        assert!(SchemaResolver.resolve(&car, &Projection::Field("Mileage")).is_ok());
        assert_eq!(
            SchemaResolver
                .resolve(&car, &Projection::Field("Wheels"))
                .unwrap_err(),
            QueryError::UnknownColumn {
                table: "Car".into(),
                column: "Wheels".into()
            }
        );
        assert!(SchemaResolver.resolve(&car, &Projection::Wildcard).is_ok());
    }

    #[test]
    fn schema_resolver_accepts_undeclared_tables() {
        let loose = TableRef::of::<Loose>();
        assert!(SchemaResolver.resolve(&loose, &Projection::Field("Anything")).is_ok());
    }
}
