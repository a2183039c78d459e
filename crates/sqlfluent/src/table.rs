//! Table descriptors and typed projections.
//!
//! A [`Table`] names a record type; a [`Column`] is a typed reference to one
//! of its fields. Builders accept any [`Project`] value: a single column, a
//! tuple or array of columns of the same table, [`All`] for `*`, or one of
//! those wrapped by [`Project::of`] to pick a specific alias.
//!
//! ```
//! use sqlfluent::{Column, Project, Projection, Table};
//!
//! struct Car;
//! impl Table for Car {
//!     const TABLE: &'static str = "Car";
//! }
//! impl Car {
//!     const ID: Column<Car> = Column::new("Id");
//!     const MILEAGE: Column<Car> = Column::new("Mileage");
//! }
//!
//! assert_eq!(Car::ID.projection(), Projection::Field("Id"));
//! assert_eq!((Car::ID, Car::MILEAGE).projection(), Projection::Fields(vec!["Id", "Mileage"]));
//! assert_eq!(Car::ID.of("c").alias_hint(), Some("c"));
//! ```
//!
//! `#[derive(Table)]` generates the `Table` impl and one column constant per
//! field.

use std::fmt;
use std::marker::PhantomData;

/// A record type that maps to a SQL table.
pub trait Table: 'static {
    /// Canonical table name; also the default alias.
    const TABLE: &'static str;
    /// Declared column names. Empty means "not declared".
    const COLUMNS: &'static [&'static str] = &[];
}

/// Runtime descriptor of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableRef {
    pub const fn of<T: Table>() -> Self {
        Self {
            name: T::TABLE,
            columns: T::COLUMNS,
        }
    }

    /// Whether `column` is declared. Always true when no columns are declared.
    pub fn declares(&self, column: &str) -> bool {
        self.columns.is_empty() || self.columns.contains(&column)
    }
}

/// Declarative shape of a field reference, resolved by a
/// [`ProjectionResolver`](crate::ProjectionResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Every column (`*`).
    Wildcard,
    /// A single field access.
    Field(&'static str),
    /// A tuple of field accesses, in order.
    Fields(Vec<&'static str>),
    /// Anything else (computed expression); not resolvable to field names.
    Expression(String),
}

/// A typed field descriptor.
pub struct Column<T> {
    name: &'static str,
    _table: PhantomData<fn() -> T>,
}

impl<T> Column<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _table: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T: Table> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({}.{})", T::TABLE, self.name)
    }
}

/// Wildcard projection over a table.
pub struct All<T>(PhantomData<fn() -> T>);

impl<T> All<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for All<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A projection that is not a field access, e.g. `Price * 2`.
///
/// Builders accept it so it can flow through the same code paths, but the
/// default resolvers reject it as an unsupported shape.
pub struct Expression<T> {
    text: String,
    _table: PhantomData<fn() -> T>,
}

impl<T> Expression<T> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            _table: PhantomData,
        }
    }
}

/// Something that names one or more fields of a single table.
pub trait Project: Sized {
    type Table: Table;

    fn projection(&self) -> Projection;

    /// Alias the projection should be resolved against. `None` lets the
    /// registry infer the unique binding of the table.
    fn alias_hint(&self) -> Option<&str> {
        None
    }

    /// Resolve against a specific alias.
    fn of(self, alias: impl Into<String>) -> Aliased<Self> {
        Aliased {
            inner: self,
            alias: alias.into(),
        }
    }

    /// Erase the table type.
    fn field_ref(&self) -> FieldRef {
        FieldRef {
            table: TableRef::of::<Self::Table>(),
            projection: self.projection(),
            alias_hint: self.alias_hint().map(str::to_owned),
        }
    }
}

/// A projection bound to an explicit alias.
#[derive(Debug, Clone)]
pub struct Aliased<P> {
    inner: P,
    alias: String,
}

impl<P: Project> Project for Aliased<P> {
    type Table = P::Table;

    fn projection(&self) -> Projection {
        self.inner.projection()
    }

    fn alias_hint(&self) -> Option<&str> {
        Some(&self.alias)
    }
}

impl<T: Table> Project for Column<T> {
    type Table = T;

    fn projection(&self) -> Projection {
        Projection::Field(self.name)
    }
}

impl<T: Table> Project for All<T> {
    type Table = T;

    fn projection(&self) -> Projection {
        Projection::Wildcard
    }
}

impl<T: Table> Project for Expression<T> {
    type Table = T;

    fn projection(&self) -> Projection {
        Projection::Expression(self.text.clone())
    }
}

impl<T: Table, const N: usize> Project for [Column<T>; N] {
    type Table = T;

    fn projection(&self) -> Projection {
        Projection::Fields(self.iter().map(Column::name).collect())
    }
}

impl<T: Table> Project for Vec<Column<T>> {
    type Table = T;

    fn projection(&self) -> Projection {
        Projection::Fields(self.iter().map(Column::name).collect())
    }
}

macro_rules! tuple_project {
    ($($name:ident),+) => {
        impl<T: Table> Project for ($(tuple_project!(@col $name, T),)+) {
            type Table = T;

            #[allow(non_snake_case)]
            fn projection(&self) -> Projection {
                let ($($name,)+) = self;
                Projection::Fields(vec![$($name.name()),+])
            }
        }
    };
    (@col $name:ident, $t:ident) => { Column<$t> };
}

tuple_project!(A);
tuple_project!(A, B);
tuple_project!(A, B, C);
tuple_project!(A, B, C, D);
tuple_project!(A, B, C, D, E);
tuple_project!(A, B, C, D, E, F);
tuple_project!(A, B, C, D, E, F, G);
tuple_project!(A, B, C, D, E, F, G, H);

/// A type-erased projection with its table and optional alias hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub table: TableRef,
    pub projection: Projection,
    pub alias_hint: Option<String>,
}

impl FieldRef {
    pub fn new<P: Project>(p: &P) -> Self {
        p.field_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Car, Maker};

    #[test]
    fn column_projection() {
        assert_eq!(Car::MILEAGE.projection(), Projection::Field("Mileage"));
        assert_eq!(Car::MILEAGE.alias_hint(), None);
    }

    #[test]
    fn tuple_and_array_projection() {
        assert_eq!(
            (Car::ID, Car::MODEL_YEAR, Car::MILEAGE).projection(),
            Projection::Fields(vec!["Id", "ModelYear", "Mileage"])
        );
        assert_eq!(
            [Car::ID, Car::PRICE].projection(),
            Projection::Fields(vec!["Id", "Price"])
        );
        let empty: [Column<Car>; 0] = [];
        assert_eq!(empty.projection(), Projection::Fields(vec![]));
    }

    #[test]
    fn aliased_field_ref() {
        let f = (Maker::ID, Maker::NAME).of("m").field_ref();
        assert_eq!(f.table, TableRef::of::<Maker>());
        assert_eq!(f.alias_hint.as_deref(), Some("m"));
        assert_eq!(f.projection, Projection::Fields(vec!["Id", "Name"]));
    }

    #[test]
    fn table_ref_declares() {
        let car = TableRef::of::<Car>();
        assert!(car.declares("Mileage"));
        assert!(!car.declares("Wheels"));
    }
}
